//! Host-provided rendering through a ratatui terminal.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Widget};
use summon_core::{Instance, LaunchOptions};
use summon_tui::{BoundRenderer, template};
use summon_types::{EffectKind, TransitionConfig};

use crate::common::{RowView, press, rows, test_terminal};

type Renderer = BoundRenderer<String, String, String, RowView>;

#[test]
fn host_draw_shows_one_row_per_pending_request() {
    let renderer = Renderer::new(LaunchOptions::default(), RowView);
    let mut terminal = test_terminal(16, 3);

    let _ = renderer.start("alpha".to_string());
    let _ = renderer.start("beta".to_string());
    terminal
        .draw(|frame| frame.render_widget(&renderer, frame.area()))
        .unwrap();

    let screen = rows(terminal.backend().buffer());
    assert_eq!(screen, vec!["alpha", "beta", ""]);
}

#[test]
fn settled_request_is_gone_on_the_next_frame() {
    let renderer = Renderer::new(LaunchOptions::default(), RowView);
    let mut terminal = test_terminal(16, 3);
    let _ = renderer.start("alpha".to_string());
    let _ = renderer.start("beta".to_string());
    terminal
        .draw(|frame| frame.render_widget(&renderer, frame.area()))
        .unwrap();

    // `y` goes to the most recent request.
    assert!(renderer.handle_key(press('y')));
    terminal
        .draw(|frame| frame.render_widget(&renderer, frame.area()))
        .unwrap();

    let screen = rows(terminal.backend().buffer());
    assert_eq!(screen, vec!["alpha", "", ""]);
}

#[test]
fn host_chooses_where_instances_appear() {
    let renderer = Renderer::new(LaunchOptions::default(), RowView);
    let _ = renderer.start("inset".to_string());

    let mut buf = Buffer::empty(Rect::new(0, 0, 12, 4));
    let region = Rect::new(4, 2, 8, 2);
    (&renderer).render(region, &mut buf);

    let screen = rows(&buf);
    assert_eq!(screen[0], "");
    assert_eq!(screen[2], "    inset");
}

#[test]
fn enter_and_leave_effects_run_to_completion() {
    let options = LaunchOptions::new().with_transition(TransitionConfig::new(
        Some(EffectKind::PopScale),
        Some(EffectKind::SlideUp),
        Duration::from_millis(120),
    ));
    let renderer = Renderer::new(options, RowView);
    let area = Rect::new(0, 0, 16, 3);

    let _ = renderer.start("hello".to_string());
    let mut buf = Buffer::empty(area);
    (&renderer).render(area, &mut buf);
    assert!(renderer.is_animating());

    renderer.advance(Duration::from_millis(120));
    assert!(!renderer.is_animating());

    renderer.registry().first().unwrap().resolve(String::new());
    let mut buf = Buffer::empty(area);
    (&renderer).render(area, &mut buf);
    assert!(renderer.is_animating());
    assert!(rows(&buf).iter().any(|row| row.contains("hello")));

    renderer.advance(Duration::from_millis(120));
    let mut buf = Buffer::empty(area);
    (&renderer).render(area, &mut buf);
    assert!(rows(&buf).iter().all(String::is_empty));
}

#[test]
fn template_view_renders_with_closure() {
    let view = template(
        |instance: &Instance<(), u32, ()>, area: Rect, buf: &mut Buffer| {
            Paragraph::new(format!("n={}", instance.args())).render(area, buf);
        },
    )
    .with_size(6, 1);
    let renderer: BoundRenderer<(), u32, (), _> =
        BoundRenderer::new(LaunchOptions::default(), view);
    let _ = renderer.start(42);

    let area = Rect::new(0, 0, 6, 1);
    let mut buf = Buffer::empty(area);
    (&renderer).render(area, &mut buf);
    assert_eq!(rows(&buf)[0], "n=42");
}
