//! Playground state: one self-hosted dialog launcher and an outcome log.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use summon_tui::{Mount, OverlayHost, SelfHosted};
use summon_types::LaunchOptions;

use crate::dialog::{ConfirmView, DialogError, DialogResult};

const LOG_CAPACITY: usize = 200;

type Launcher = SelfHosted<DialogResult, String, DialogError, ConfirmView>;

pub struct App {
    overlay: OverlayHost,
    launcher: Launcher,
    mount: Option<Mount>,
    log: Rc<RefCell<VecDeque<String>>>,
    launched: u64,
    quit: bool,
}

impl App {
    pub fn new(options: LaunchOptions) -> anyhow::Result<Self> {
        let overlay = OverlayHost::new();
        let launcher = SelfHosted::new(options, ConfirmView::default());
        let mount = launcher.activate(&overlay)?;
        Ok(Self {
            overlay,
            launcher,
            mount: Some(mount),
            log: Rc::new(RefCell::new(VecDeque::new())),
            launched: 0,
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn tick(&self, delta: Duration) {
        self.overlay.advance(delta);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        if self.overlay.handle_key(key) {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('d') => self.open_dialog(),
            KeyCode::Char('m') => self.toggle_mount(),
            _ => {}
        }
    }

    fn open_dialog(&mut self) {
        let prompt = format!("Proceed with request {}?", self.launched + 1);
        let Some(launch) = self.launcher.launch(prompt) else {
            self.push_log("launcher unmounted; press m to mount".to_string());
            return;
        };
        self.launched += 1;
        if launch.is_joined() {
            self.push_log("singleton: joined the open dialog".to_string());
            return;
        }

        let handle = launch.into_handle();
        let log = Rc::clone(&self.log);
        let request = self.launched;
        tokio::task::spawn_local(async move {
            let line = match handle.await {
                Ok(result) => format!("request {request} resolved: {result}"),
                Err(err) => format!("request {request} failed: {err}"),
            };
            tracing::info!("{line}");
            push_bounded(&log, line);
        });
    }

    fn toggle_mount(&mut self) {
        match self.mount.take() {
            Some(mount) => {
                mount.deactivate();
                self.push_log("launcher unmounted".to_string());
            }
            None => match self.launcher.activate(&self.overlay) {
                Ok(mount) => {
                    self.mount = Some(mount);
                    self.push_log("launcher mounted".to_string());
                }
                Err(err) => self.push_log(err.to_string()),
            },
        }
    }

    fn push_log(&self, line: String) {
        push_bounded(&self.log, line);
    }

    pub fn draw(&self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let log = self.log.borrow();
        let lines: Vec<Line> = log
            .iter()
            .rev()
            .take(usize::from(body.height.saturating_sub(2)))
            .map(|line| Line::from(line.as_str()))
            .collect();
        let title = format!(
            " summon · {} pending{} ",
            self.launcher.registry().len(),
            if self.launcher.is_active() { "" } else { " · unmounted" }
        );
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
            body,
        );
        frame.render_widget(
            Paragraph::new("d: dialog   m: mount/unmount   q: quit")
                .style(Style::default().fg(Color::DarkGray)),
            footer,
        );

        frame.render_widget(&self.overlay, frame.area());
    }
}

fn push_bounded(log: &RefCell<VecDeque<String>>, line: String) {
    let mut log = log.borrow_mut();
    if log.len() == LOG_CAPACITY {
        log.pop_front();
    }
    log.push_back(line);
}
