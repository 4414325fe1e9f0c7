use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::page::{Page, ParseOptions};

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the previewer until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the terminal cannot be
    /// initialized, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let source = std::fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; tocmark requires an interactive terminal")?;
        let size = terminal.size()?;

        let options = ParseOptions {
            width: crate::ui::document_content_width(size.width, self.toc_visible),
            nav_prefix: self.settings.nav_prefix.clone(),
        };
        let parse_scope = crate::perf::scope("app.parse");
        let page = Page::parse_with_options(&source, &options)?;
        drop(parse_scope);
        crate::perf::log_event(
            "init.layout",
            format!(
                "terminal={}x{} toc_visible={} layout_width={} sections={}",
                size.width,
                size.height,
                self.toc_visible,
                options.width,
                page.sections().len()
            ),
        );

        let mut model = Model::new(
            self.file_path.clone(),
            page,
            (size.width, size.height),
            self.settings.clone(),
        )
        .with_toc_visible(self.toc_visible);

        let result = execute!(stdout(), EnableMouseCapture)
            .map_err(anyhow::Error::from)
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            // Coalesce bursts (key repeat, wheel) into a single frame.
            let mut wait = Duration::from_millis(poll_ms);
            while event::poll(wait)? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let event = event::read()?;
                if let Some(msg) =
                    Self::handle_event(&event, model, event_ms, &mut resize_debouncer)
                {
                    crate::perf::log_event("event.message", format!("frame={frame_idx} msg={msg:?}"));
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }
                wait = Duration::ZERO;
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3} viewport={:?} current={:?}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.viewport.visible_range(),
                        model.current_entries()
                    ),
                );
                needs_render = false;
            }
        }
        Ok(())
    }
}
