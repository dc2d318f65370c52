//! End-to-end layout scenarios driven through `ScrollStack`.

use stack_core::{
    Alignment, ConfigError, ContentId, CrossAxisMode, Item, LayoutDirection, LayoutError, SafeArea,
    Size, StackError, StackOptions,
};
use stack_layout::{Bounds, ScrollStack, StaticContent, TaskQueue};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn vertical_stack(width: f64, height: f64) -> ScrollStack {
    init_tracing();
    let stack = ScrollStack::new(StackOptions::vertical(), TaskQueue::new());
    stack.set_viewport(Size::new(width, height));
    stack
}

fn fixed(id: u64, size: f64) -> Item {
    Item::builder(ContentId(id)).fixed_size(size).build().unwrap()
}

fn weighted(id: u64, weight: f64) -> Item {
    Item::builder(ContentId(id)).weight(weight).build().unwrap()
}

#[test]
fn test_three_fixed_items() {
    let stack = vertical_stack(200.0, 300.0);
    for id in 1..=3 {
        stack.push(fixed(id, 50.0)).unwrap();
    }
    stack.queue().run_pending();

    let layout = stack.last_layout().unwrap();
    let offsets: Vec<f64> = layout.frames().map(|(_, frame)| frame.y).collect();
    assert_eq!(offsets, vec![0.0, 50.0, 100.0]);

    let used: f64 = layout.frames().map(|(_, frame)| frame.height).sum();
    assert!((used - 150.0).abs() < 0.001);
    // Content never reports less than the viewport it scrolls in
    assert!((layout.content_extent() - 300.0).abs() < 0.001);
}

#[test]
fn test_three_fixed_items_self_sizing() {
    init_tracing();
    let options = StackOptions::vertical().with_self_size_primary(true);
    let stack = ScrollStack::new(options, TaskQueue::new());
    stack.set_viewport(Size::new(200.0, 300.0));
    for id in 1..=3 {
        stack.push(fixed(id, 50.0)).unwrap();
    }

    let layout = stack.layout_now().unwrap();
    assert!((layout.content_extent() - 150.0).abs() < 0.001);
    assert!((stack.viewport().height - 150.0).abs() < 0.001);
}

#[test]
fn test_weighted_after_fixed() {
    let stack = vertical_stack(200.0, 300.0);
    stack.push(fixed(1, 100.0)).unwrap();
    stack.push(weighted(2, 1.0)).unwrap();

    let layout = stack.layout_now().unwrap();
    assert_eq!(layout.frame(ContentId(2)), Some(Bounds::new(0.0, 100.0, 200.0, 200.0)));
    assert!((layout.content_extent() - 300.0).abs() < 0.001);
}

#[test]
fn test_weighted_before_fixed() {
    let stack = vertical_stack(200.0, 300.0);
    stack.push(weighted(1, 1.0)).unwrap();
    stack.push(fixed(2, 100.0)).unwrap();

    let layout = stack.layout_now().unwrap();
    assert_eq!(layout.frame(ContentId(1)), Some(Bounds::new(0.0, 0.0, 200.0, 200.0)));
    assert_eq!(layout.frame(ContentId(2)), Some(Bounds::new(0.0, 200.0, 200.0, 100.0)));
}

#[test]
fn test_weights_split_proportionally() {
    let stack = vertical_stack(100.0, 400.0);
    stack.push(fixed(1, 100.0)).unwrap();
    stack
        .push(Item::builder(ContentId(2)).fixed_size(20.0).weight(1.0).build().unwrap())
        .unwrap();
    stack.push(weighted(3, 2.0)).unwrap();

    let layout = stack.layout_now().unwrap();
    // 280 leftover: a third on top of the 20 base, two thirds to the other
    let first = layout.frame(ContentId(2)).unwrap();
    let second = layout.frame(ContentId(3)).unwrap();
    assert!((first.height - (20.0 + 280.0 / 3.0)).abs() < 0.001);
    assert!((second.height - 560.0 / 3.0).abs() < 0.001);
    assert!((second.bottom() - 400.0).abs() < 0.001);
    assert_eq!(layout.passes, 2);
}

#[test]
fn test_percent_above_one_rejected() {
    let stack = vertical_stack(200.0, 300.0);
    stack.push(fixed(1, 50.0)).unwrap();
    let generation = stack.generation();

    let err = Item::builder(ContentId(2)).percent_size(1.5).build().unwrap_err();
    assert_eq!(err, ConfigError::PercentOutOfRange { value: 1.5 });
    assert!(stack.configure_first(|b| b.percent_size(1.5)).is_err());

    assert_eq!(stack.items(), vec![fixed(1, 50.0)]);
    assert_eq!(stack.generation(), generation);
}

#[test]
fn test_duplicate_push_leaves_stack_unchanged() {
    let stack = vertical_stack(200.0, 300.0);
    stack.push(fixed(1, 50.0)).unwrap();
    let err = stack.push(fixed(1, 80.0)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateContent {
            content: ContentId(1)
        }
    );
    assert_eq!(stack.items(), vec![fixed(1, 50.0)]);
}

#[test]
fn test_percent_of_viewport() {
    let stack = vertical_stack(200.0, 400.0);
    stack
        .push(Item::builder(ContentId(1)).percent_size(0.25).build().unwrap())
        .unwrap();
    stack
        .push(
            Item::builder(ContentId(2))
                .percent_size(0.25)
                .fixed_size(150.0)
                .build()
                .unwrap(),
        )
        .unwrap();

    let layout = stack.layout_now().unwrap();
    assert!((layout.frame(ContentId(1)).unwrap().height - 100.0).abs() < 0.001);
    assert!((layout.frame(ContentId(2)).unwrap().height - 150.0).abs() < 0.001);
}

#[test]
fn test_cross_axis_modes() {
    let stack = vertical_stack(300.0, 600.0);
    stack
        .push(
            Item::builder(ContentId(1))
                .fixed_size(10.0)
                .margins(20.0, 10.0, 0.0, 0.0)
                .build()
                .unwrap(),
        )
        .unwrap();
    stack
        .push(
            Item::builder(ContentId(2))
                .fixed_size(10.0)
                .cross_axis(CrossAxisMode::percent(0.5, Alignment::End))
                .build()
                .unwrap(),
        )
        .unwrap();
    stack
        .push(
            Item::builder(ContentId(3))
                .fixed_size(10.0)
                .cross_axis(CrossAxisMode::fit_extent(100.0, Alignment::Middle))
                .build()
                .unwrap(),
        )
        .unwrap();

    let layout = stack.layout_now().unwrap();
    let fill = layout.frame(ContentId(1)).unwrap();
    assert!((fill.x - 20.0).abs() < 0.001);
    assert!((fill.width - 270.0).abs() < 0.001);

    let percent = layout.frame(ContentId(2)).unwrap();
    assert!((percent.width - 150.0).abs() < 0.001);
    assert!((percent.x - 150.0).abs() < 0.001);

    let fit = layout.frame(ContentId(3)).unwrap();
    assert!((fit.center_x() - 150.0).abs() < 0.001);
}

#[test]
fn test_right_to_left_content() {
    let stack = vertical_stack(200.0, 300.0);
    let id = stack.add_content(
        StaticContent::new(Size::new(50.0, 20.0)).with_direction(LayoutDirection::RightToLeft),
    );
    stack
        .push(
            Item::builder(id)
                .leading(30.0)
                .trailing(10.0)
                .cross_axis(CrossAxisMode::fit_extent(50.0, Alignment::End))
                .build()
                .unwrap(),
        )
        .unwrap();

    let layout = stack.layout_now().unwrap();
    let frame = layout.frame(id).unwrap();
    // Leading maps to the right edge, so End lands against the trailing side
    assert!((frame.x - 120.0).abs() < 0.001);
    assert!((frame.right() - 170.0).abs() < 0.001);
}

#[test]
fn test_horizontal_insets() {
    init_tracing();
    let stack = ScrollStack::new(StackOptions::horizontal(), TaskQueue::new());
    stack.set_viewport(Size::new(100.0, 80.0));
    stack.set_safe_area(SafeArea::new(0.0, 10.0, 0.0, 20.0));
    stack.push(fixed(1, 200.0)).unwrap();

    let layout = stack.layout_now().unwrap();
    assert!((layout.frame(ContentId(1)).unwrap().x - 10.0).abs() < 0.001);
    assert!((layout.content_extent() - 230.0).abs() < 0.001);

    stack.set_auto_adjust_leading_inset(false);
    let layout = stack.layout_now().unwrap();
    assert_eq!(layout.frame(ContentId(1)).unwrap().x, 0.0);
    assert!((layout.content_extent() - 220.0).abs() < 0.001);
}

#[test]
fn test_natural_sizes_from_content() {
    let stack = vertical_stack(320.0, 200.0);
    let title = stack.add_content(StaticContent::new(Size::new(200.0, 28.0)));
    let body = stack.add_content(StaticContent::new(Size::new(300.0, 90.0)));
    stack.push(Item::builder(title).bottom(4.0).build().unwrap()).unwrap();
    stack
        .push(
            Item::builder(body)
                .cross_axis(CrossAxisMode::fit(Alignment::Middle))
                .build()
                .unwrap(),
        )
        .unwrap();

    let layout = stack.layout_now().unwrap();
    assert_eq!(layout.frame(title), Some(Bounds::new(0.0, 0.0, 320.0, 28.0)));
    assert_eq!(layout.frame(body), Some(Bounds::new(10.0, 32.0, 300.0, 90.0)));
}

#[test]
fn test_scroll_fraction_of_layout() {
    let stack = vertical_stack(200.0, 300.0);
    stack.push(fixed(1, 500.0)).unwrap();
    let layout = stack.layout_now().unwrap();

    assert!((layout.scroll_fraction(100.0) - 0.5).abs() < 0.001);
    assert_eq!(layout.scroll_fraction(-5.0), 0.0);
    assert_eq!(layout.scroll_fraction(1000.0), 1.0);
}

#[test]
fn test_nested_stack_measured_depth_first() {
    init_tracing();
    let queue = TaskQueue::new();
    let outer = ScrollStack::new(StackOptions::vertical(), queue.clone());
    outer.set_viewport(Size::new(320.0, 600.0));

    let row = ScrollStack::new(StackOptions::horizontal(), queue.clone());
    for (id, height) in [(1, 40.0), (2, 60.0), (3, 20.0)] {
        row.push(
            Item::builder(ContentId(id))
                .fixed_size(100.0)
                .cross_axis(CrossAxisMode::fit_extent(height, Alignment::Begin))
                .build()
                .unwrap(),
        )
        .unwrap();
    }

    let row_id = outer.add_content(row.clone());
    outer.push(Item::new(row_id)).unwrap();
    outer.push(fixed(500, 100.0)).unwrap();
    queue.run_pending();

    assert_eq!(outer.frame(row_id), Some(Bounds::new(0.0, 0.0, 320.0, 60.0)));
    assert_eq!(
        outer.frame(ContentId(500)),
        Some(Bounds::new(0.0, 60.0, 320.0, 100.0))
    );

    // The outer frame becomes the row's viewport and the row lays out again
    assert_eq!(row.viewport(), Size::new(320.0, 60.0));
    assert_eq!(row.frame(ContentId(3)), Some(Bounds::new(200.0, 0.0, 100.0, 20.0)));
    assert_eq!(queue.pending(), 0);
}

#[test]
fn test_mutual_containment_is_a_cycle() {
    init_tracing();
    let queue = TaskQueue::new();
    let a = ScrollStack::new(StackOptions::vertical(), queue.clone());
    let b = ScrollStack::new(StackOptions::vertical(), queue.clone());
    a.set_viewport(Size::new(100.0, 100.0));
    a.push(fixed(100, 10.0)).unwrap();
    queue.run_pending();
    let before = a.last_layout().unwrap();

    let b_in_a = a.add_content(b.clone());
    a.push(Item::new(b_in_a)).unwrap();
    let a_in_b = b.add_content(a.clone());
    b.push(Item::new(a_in_b)).unwrap();

    let err = a.layout_now().unwrap_err();
    assert_eq!(err, StackError::Layout(LayoutError::CycleDetected));

    // Deferred failures are logged and keep the previous layout
    a.layout_deferred();
    queue.run_pending();
    assert_eq!(a.last_layout(), Some(before));

    a.unregister(b_in_a);
    b.unregister(a_in_b);
}

#[test]
fn test_burst_of_mutations_lays_out_once() {
    let stack = vertical_stack(200.0, 300.0);
    stack.queue().run_pending();
    let baseline = stack.recomputations();

    for id in 0..10 {
        stack.push(fixed(id, 10.0)).unwrap();
    }
    stack.remove_at(0);
    stack.replace_at(0, fixed(1, 30.0)).unwrap();
    stack.configure_last(|b| b.weight(1.0)).unwrap();
    stack.insert(0, fixed(42, 5.0)).unwrap();

    assert_eq!(stack.queue().run_pending(), 14);
    assert_eq!(stack.recomputations(), baseline + 1);

    let layout = stack.last_layout().unwrap();
    assert_eq!(layout.frame_at(0).map(|(id, _)| id), Some(ContentId(42)));
    assert_eq!(layout.len(), 10);
    assert!((layout.frame(ContentId(9)).unwrap().bottom() - 300.0).abs() < 0.001);
}

#[test]
fn test_layout_is_idempotent() {
    let stack = vertical_stack(250.0, 500.0);
    let label = stack.add_content(StaticContent::new(Size::new(90.0, 33.0)));
    stack.push(Item::new(label)).unwrap();
    stack.push(weighted(7, 2.0)).unwrap();
    stack
        .push(Item::builder(ContentId(8)).percent_size(0.1).build().unwrap())
        .unwrap();

    let first = stack.layout_now().unwrap();
    let second = stack.layout_now().unwrap();
    assert_eq!(first, second);
}
