//! Layout computation for scrollable stacks.
//!
//! This crate positions an ordered list of items along one stacking axis
//! and resolves each item's extent on the perpendicular axis.
//!
//! # Architecture
//!
//! 1. **Primary-axis sizing**: fixed, percent-of-viewport, weighted and natural extents
//! 2. **Weight redistribution**: a second pass splits leftover space between weighted items
//! 3. **Cross-axis resolution**: fill, percent and fit extents with alignment
//! 4. **Natural-size measurement**: intrinsic-size queries cached for the whole call
//! 5. **Scheduling**: mutations coalesce into one deferred recomputation
//!
//! # Example
//!
//! ```ignore
//! use stack_layout::{ScrollStack, StaticContent, TaskQueue};
//! use stack_core::{Item, Size, StackOptions};
//!
//! let queue = TaskQueue::new();
//! let stack = ScrollStack::new(StackOptions::vertical(), queue.clone());
//! stack.set_viewport(Size::new(320.0, 480.0));
//!
//! let label = stack.add_content(StaticContent::new(Size::new(120.0, 24.0)));
//! stack.push(Item::builder(label).top(8.0).build()?)?;
//!
//! queue.run_pending();
//! if let Some(layout) = stack.last_layout() {
//!     for (id, frame) in layout.frames() {
//!         println!("{}: {:?}", id, frame);
//!     }
//! }
//! ```

mod compute;
mod cross;
mod frame;
mod items;
mod measure;
mod primary;
mod schedule;
mod stack;

pub use compute::{compute_layout, LayoutContext};
pub use frame::{Bounds, LayoutResult};
pub use items::ItemList;
pub use measure::{Content, ContentStore, IntrinsicSize, SizingHook, StaticContent};
pub use schedule::{LayoutScheduler, Task, TaskQueue};
pub use stack::{LayoutObserver, ScrollStack};
