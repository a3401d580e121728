use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;

use crate::background::{backend::ExpenseBackend, data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, handlers, AppCommand};
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging_with_buffer;
use crate::settings::Settings;
use crate::state::AppState;
use crate::ui::screens::Screen;
use expense_api::Client;

const LOG_BUFFER_SIZE: usize = 5000;

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        let log_buffer = LogBuffer::new(LOG_BUFFER_SIZE);
        let log_path = init_logging_with_buffer(log_buffer.clone())?;

        tracing::info!("expense-tracker starting, logging to {}", log_path.display());
        tracing::info!("Backend: {}", self.settings.backend_url);

        let mut terminal = self.init()?;

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();

        let mut ui_state = AppState::with_recent_days(self.settings.recent_days);
        let mut task_manager = BackgroundTaskManager::new();

        let backend: Arc<dyn ExpenseBackend> = Arc::new(self.client());
        let data_loader = DataLoader::new(backend, data_tx);

        let mut event_stream = EventStream::new();

        executor::execute_command(
            AppCommand::LoadExpenses,
            &mut ui_state,
            &mut task_manager,
            &data_loader,
        );

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            if let Screen::Logs(logs_state) = ui_state.current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, &log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            // Logging here would grow the buffer being viewed
                            let on_logs_screen = matches!(ui_state.current_screen(), Screen::Logs(_));
                            if let Some(command) = handlers::handle_key_input(KeyEvent::from(key), &ui_state) {
                                if !on_logs_screen {
                                    tracing::debug!("Executing command: {:?}", command);
                                }
                                executor::execute_command(
                                    command,
                                    &mut ui_state,
                                    &mut task_manager,
                                    &data_loader,
                                );
                            }
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
            }

            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        ui_state.cancel_pending_requests();
        task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
    }

    fn client(&self) -> Client {
        match &self.settings.auth_token {
            Some(token) => Client::with_token(&self.settings.backend_url, token),
            None => Client::new(&self.settings.backend_url),
        }
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
