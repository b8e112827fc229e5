//! vector-drop: headless session of the icon panel and plugin controller.
//!
//! The panel driver runs against the live icon API (or a built-in offline
//! set) and talks JSON to a controller backed by an in-memory page, so
//! the whole message flow can be exercised from a terminal.

mod commands;
mod offline;

use clap::Parser;
use commands::Command;
use offline::OfflineSource;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use vd_controller::{Controller, ControllerConfig, MemoryHost};
use vd_core::layout::Point;
use vd_core::protocol::{self, PluginMessage};
use vd_icons::{FEATURED_COLLECTIONS, IconClient, IconSource, featured};
use vd_panel::{Driver, IconPanel, PanelConfig, PanelEvent, PanelUpdate};

#[derive(Parser)]
#[command(
    name = "vector-drop",
    about = "Drive the Vector Drop panel and controller from a terminal",
    version
)]
struct Cli {
    /// Icon API base URL (defaults to $VECTOR_DROP_ICON_API or the public API)
    #[arg(long)]
    api_base: Option<String>,

    /// Search debounce window in milliseconds
    #[arg(long, default_value_t = 300)]
    debounce_ms: u64,

    /// Use the built-in icon set instead of the network
    #[arg(long)]
    offline: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = PanelConfig::from_env();
    if let Some(base) = cli.api_base {
        config.api_base = base;
    }
    config.debounce = Duration::from_millis(cli.debounce_ms);

    let host = if cli.offline {
        log::info!("using the built-in icon set");
        session(Arc::new(OfflineSource), &config).await
    } else {
        let client = IconClient::new(config.api_base.clone());
        log::info!("icon API at {}", client.base_url());
        session(Arc::new(client), &config).await
    };

    println!("{} node(s) on the page", host.page_nodes().len());
    for id in host.page_nodes() {
        if let Some(node) = host.node(id) {
            let b = node.bounds();
            println!(
                "  {} {} at ({}, {}) {}x{}",
                node.name,
                node.kind.as_str(),
                b.x,
                b.y,
                b.width,
                b.height
            );
        }
    }
}

/// Run the panel against the controller until the user quits or stdin
/// ends. Returns the controller's host for a final report.
async fn session<S: IconSource + 'static>(source: Arc<S>, config: &PanelConfig) -> MemoryHost {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (to_controller, controller_rx) = mpsc::unbounded_channel();
    let (controller_tx, from_controller) = mpsc::unbounded_channel();

    let controller = tokio::spawn(run_controller(controller_rx, controller_tx));
    // plain thread: a pending tokio stdin read holds up runtime shutdown
    std::thread::spawn(move || read_commands(events_tx));

    println!("{}", commands::HELP);
    let driver = Driver::new(source, config);
    let panel = driver
        .run(events_rx, from_controller, to_controller, report)
        .await;
    log::debug!("panel closed with {} icon(s) listed", panel.search.icons.len());

    match controller.await {
        Ok(host) => host,
        Err(e) => {
            eprintln!("vector-drop: controller task failed: {e}");
            std::process::exit(1);
        }
    }
}

/// The plugin side: one controller over an in-memory page.
async fn run_controller(
    mut inbox: mpsc::UnboundedReceiver<String>,
    outbox: mpsc::UnboundedSender<String>,
) -> MemoryHost {
    let mut controller = Controller::start(
        MemoryHost::new(Point::default()),
        ControllerConfig::default(),
    );

    while let Some(json) = inbox.recv().await {
        controller.handle_json(&json);
        if controller.host_mut().take_selection_changed() {
            controller.on_selection_change();
        }

        let host = controller.host_mut();
        for toast in host.toasts.drain(..) {
            println!("[toast] {toast}");
        }
        for message in host.take_messages() {
            match protocol::encode_enveloped(&message) {
                Ok(json) => {
                    if outbox.send(json).is_err() {
                        log::debug!("panel is gone");
                    }
                }
                Err(e) => log::error!("could not encode reply: {e}"),
            }
        }
        if host.closed {
            break;
        }
    }
    controller.into_host()
}

fn read_commands(events: mpsc::UnboundedSender<PanelEvent>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("stdin: {e}");
                break;
            }
        };
        match commands::parse(&line) {
            Ok(Command::Events(batch)) => {
                for event in batch {
                    if events.send(event).is_err() {
                        return;
                    }
                }
            }
            Ok(Command::Sets) => {
                for set in FEATURED_COLLECTIONS {
                    println!("  {:<10} {}", set.prefix, set.title);
                }
            }
            Ok(Command::Help) => println!("{}", commands::HELP),
            Err(e) => eprintln!("{e}"),
        }
    }
}

fn report(update: PanelUpdate<'_>, panel: &IconPanel) {
    match update {
        PanelUpdate::Results => {
            let collection = &panel.search.collection;
            match collection.prefix().and_then(featured) {
                Some(set) => println!("── {} ──", set.title),
                None => println!("── {collection} ──"),
            }
            if let Some(text) = panel.search.empty_text() {
                println!("{text}");
            }
            if let Some(error) = &panel.search.error {
                println!("{error}");
            }
            for (i, icon) in panel.search.icons.iter().enumerate() {
                println!("{i:>3}  {}", icon.full_name());
            }
        }
        PanelUpdate::Sent(message) => log::debug!("-> {}", message.tag()),
        PanelUpdate::Received(message) => match message {
            PluginMessage::ShapesCreated { count } => println!("created {count} shape(s)"),
            PluginMessage::IconInserted { name } => println!("inserted {name}"),
            PluginMessage::SelectionChanged(info) => {
                println!("selection: {} [{}]", info.count, info.types.join(", "))
            }
            PluginMessage::Error { message } => println!("error: {message}"),
        },
    }
}
