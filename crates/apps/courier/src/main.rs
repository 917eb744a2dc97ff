//! Courier - A terminal console for two-way SMS conversations
//!
//! This is the main entry point for the Courier application.

use anyhow::{Context, Result};
use log::{error, info, warn};
use sms::{Console, CourierConfig, Debouncer, Form, GatewayClient, RealtimeEvent};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

mod display;
mod input;
mod transport;

use input::Command;

/// Everything the UI loop reacts to
enum UiEvent {
    Input(String),
    Realtime(RealtimeEvent),
    /// Debounced sheet search, fired after typing settles
    SheetSearch(String),
    InputClosed,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let settings = CourierConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {:#}", e);
        if let Some(path) = CourierConfig::default_path() {
            warn!("Config is read from {}", path.display());
        }
        CourierConfig::default()
    });
    if settings.user_id.is_none() {
        warn!("No user id configured; account-wide updates will not be received");
    }

    let client = GatewayClient::new(&settings.server_url, settings.request_timeout())
        .context("Failed to create console client")?;
    info!("Console server: {}", client.base_url());

    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();

    let websocket_url = settings.websocket_url()?;
    let realtime_tx = ui_tx.clone();
    let transport = transport::spawn(websocket_url, move |event| {
        let _ = realtime_tx.send(UiEvent::Realtime(event));
    });

    let mut console = Console::new(
        Arc::new(client),
        Box::new(transport),
        Box::new(display::TerminalNotifier),
        settings.user_id.clone(),
    );

    let search_tx = ui_tx.clone();
    let mut sheet_search = Debouncer::new(settings.search_debounce(), move |query: String| {
        let _ = search_tx.send(UiEvent::SheetSearch(query));
    });

    spawn_stdin_reader(ui_tx);

    console = step(console, |console| {
        console.refresh_conversations();
        console.search_sheets("");
    })
    .await?;
    display::conversations(&console);
    println!("Type 'help' for commands.");

    while let Some(event) = ui_rx.recv().await {
        match event {
            UiEvent::Input(line) if line.trim().is_empty() => {}
            UiEvent::Input(line) => match input::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => display::help(),
                Ok(Command::SearchSheets(query)) => sheet_search.call(query),
                Ok(command) => console = run_command(console, command).await?,
                Err(usage) => println!("{}", usage),
            },
            UiEvent::Realtime(event) => {
                let redraw = display::Redraw::after(&event);
                console = step(console, move |console| console.handle_event(event)).await?;
                redraw.print(&console);
            }
            UiEvent::SheetSearch(query) => {
                console = step(console, move |console| console.search_sheets(&query)).await?;
                display::composer(&console);
            }
            UiEvent::InputClosed => break,
        }
    }

    sheet_search.cancel();
    info!("Courier shutting down");
    Ok(())
}

/// Run one console step on the blocking pool and take the console back
///
/// Stdin and the realtime worker keep feeding the channel meanwhile.
async fn step<F>(mut console: Console, f: F) -> Result<Console>
where
    F: FnOnce(&mut Console) + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        f(&mut console);
        console
    })
    .await
    .context("Console step panicked")
}

async fn run_command(console: Console, command: Command) -> Result<Console> {
    match command {
        Command::ShowList => {
            display::conversations(&console);
            Ok(console)
        }
        Command::ShowThread => {
            display::thread(&console);
            Ok(console)
        }
        Command::Filter(term) => {
            let mut console = console;
            console.filter_conversations(&term);
            display::conversations(&console);
            Ok(console)
        }
        Command::Open(index) => {
            let console = step(console, move |console| {
                if !console.select_visible(index) {
                    println!("No conversation at position {}", index + 1);
                }
            })
            .await?;
            display::thread(&console);
            Ok(console)
        }
        Command::Send(body) => {
            step(console, move |console| {
                console.set_message_input(body);
                let _ = console.send_message();
            })
            .await
        }
        Command::NewConversation {
            phone_numbers,
            contact_name,
            initial_message,
        } => {
            step(console, move |console| {
                let _ = console.start_conversation(
                    &phone_numbers,
                    contact_name.as_deref(),
                    initial_message.as_deref(),
                );
            })
            .await
        }
        Command::ToggleBulk => {
            let mut console = console;
            let composer = console.composer_mut();
            if composer.is_open() {
                composer.close();
            } else {
                composer.open();
            }
            display::composer(&console);
            Ok(console)
        }
        Command::SelectSheet(sheet_id) => {
            let console = step(console, move |console| {
                console.select_sheet(sheet_id.as_deref());
            })
            .await?;
            display::composer(&console);
            Ok(console)
        }
        Command::Template(text) => {
            let mut console = console;
            console.composer_mut().set_template(text);
            Ok(console)
        }
        Command::InsertPlaceholder(header) => {
            let mut console = console;
            match console.composer_mut().insert_placeholder(&header) {
                Ok(()) => println!("Template: {}", console.composer().template()),
                Err(e) => println!("{}", e.user_message()),
            }
            Ok(console)
        }
        Command::SendBulk => {
            step(console, |console| {
                let _ = console.send_bulk();
            })
            .await
        }
        Command::Twilio {
            account_sid,
            auth_token,
            phone_number,
        } => {
            let console = step(console, move |console| {
                let _ = console.save_twilio_settings(&account_sid, &auth_token, &phone_number);
            })
            .await?;
            display::settings_feedback(&console, Form::Twilio);
            Ok(console)
        }
        Command::ImportHistory { confirmed } => {
            if !confirmed {
                println!("This imports the full Twilio history. Run 'import yes' to continue.");
                return Ok(console);
            }
            println!("Importing... This may take a while.");
            let console = step(console, |console| {
                let _ = console.import_history(true);
            })
            .await?;
            display::settings_feedback(&console, Form::Import);
            Ok(console)
        }
        Command::Recalculate => {
            let console = step(console, |console| {
                let _ = console.recalculate_last_activity();
            })
            .await?;
            display::settings_feedback(&console, Form::Recalculate);
            Ok(console)
        }
        Command::ApplyContacts(json) => {
            let console = step(console, move |console| {
                let _ = console.apply_sheet_contacts(&json);
            })
            .await?;
            display::settings_feedback(&console, Form::Contacts);
            Ok(console)
        }
        // Handled by the UI loop
        Command::SearchSheets(_) | Command::Help | Command::Quit => Ok(console),
    }
}

fn spawn_stdin_reader(ui_tx: mpsc::UnboundedSender<UiEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if ui_tx.send(UiEvent::Input(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    let _ = ui_tx.send(UiEvent::InputClosed);
                    break;
                }
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    let _ = ui_tx.send(UiEvent::InputClosed);
                    break;
                }
            }
        }
    });
}
