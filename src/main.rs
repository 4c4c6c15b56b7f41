//! Console front end for the booking flow.
//!
//! Reads one turn per line from stdin. Plain lines are free text; lines
//! starting with `{` are JSON, either a button payload or a full turn.
//! `:token <value>` attaches an auth token to the following turns and
//! `:quit` exits.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voxia::adapters::{
    FileTravelRequestStore, FixtureSearchProvider, InMemoryConversationRepository,
    MarkdownItineraryGenerator,
};
use voxia::application::{
    FlowController, HandleTurnCommand, HandleTurnHandler, SearchOrchestrator,
};
use voxia::config::{AppConfig, LoggingConfig};
use voxia::domain::booking::{OutboundMessage, TurnPayload, UserTurn};
use voxia::domain::foundation::ConversationId;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_logging(&config.logging);

    let provider = FixtureSearchProvider::load(&config.search.fixture_path).await?;
    let controller = FlowController::new(
        SearchOrchestrator::new(Arc::new(provider), config.search.settings()),
        Arc::new(FileTravelRequestStore::new(&config.storage.data_dir)),
        Arc::new(MarkdownItineraryGenerator::new(
            &config.documents.output_dir,
            config.documents.base_url.clone(),
        )),
        config.flow_settings(),
    );
    let handler = HandleTurnHandler::new(
        Arc::new(InMemoryConversationRepository::new()),
        Arc::new(controller),
    );

    let conversation_id = ConversationId::new();
    tracing::info!(%conversation_id, "console session started");
    println!("Voxia travel booking. Say hello to begin, :quit to exit.");

    let mut token: Option<String> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == ":quit" {
            break;
        }
        if let Some(value) = line.strip_prefix(":token ") {
            token = Some(value.trim().to_string());
            println!("(auth token set)");
            continue;
        }

        let mut turn = match parse_turn(line) {
            Ok(turn) => turn,
            Err(e) => {
                println!("(could not parse JSON turn: {})", e);
                continue;
            }
        };
        if let Some(token) = &token {
            if turn.metadata.auth_token.is_none() {
                turn = turn.with_auth_token(token.clone());
            }
        }

        let result = handler
            .handle(HandleTurnCommand {
                conversation_id,
                turn,
            })
            .await?;
        for message in &result.messages {
            print_message(message);
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn parse_turn(line: &str) -> Result<UserTurn, serde_json::Error> {
    if !line.starts_with('{') {
        return Ok(UserTurn::text(line));
    }
    match serde_json::from_str::<TurnPayload>(line) {
        Ok(payload) => Ok(UserTurn::payload(payload)),
        Err(_) => serde_json::from_str::<UserTurn>(line),
    }
}

fn print_message(message: &OutboundMessage) {
    println!("\n{}", message.body());
    for button in message.buttons() {
        println!("  [{}] {}", button.title, button.payload);
    }
}
