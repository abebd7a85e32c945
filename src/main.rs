use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use postsmith::cli::{ask, ask_secret, Commands, API_KEY_WARNING};
use postsmith::{
    ChatClient, GenerateBlogPostUseCase, ImageClient, MockChatClient, MockImageClient,
    OpenAiChatClient, OpenAiConfig, OpenAiImageClient, PromptLibrary, TerminalPresenter,
};

const LONG_ABOUT: &str = "\
Generate a blog post from a topic:
  1. Summarizes the topic into 3 bullet points.
  2. Expands each bullet point into detailed paragraphs.
  3. Creates a polished final blog post with an introduction, body, and conclusion.";

#[derive(Parser)]
#[command(name = "postsmith")]
#[command(author, version, about, long_about = LONG_ABOUT)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use deterministic offline clients instead of the remote API
    #[arg(long, global = true)]
    mock_llm: bool,

    /// Override OPENAI_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override OPENAI_MODEL
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let prompts = PromptLibrary::new()?;

    match cli.command {
        Commands::Prompts { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&prompts.all())?);
            } else {
                for template in prompts.all() {
                    println!(
                        "== {} ({})",
                        template.name(),
                        template.input_variables().join(", ")
                    );
                    println!("{}", template.template().trim());
                    println!();
                }
            }
        }

        Commands::Generate {
            topic,
            api_key,
            background,
            json,
        } => {
            let mut config = OpenAiConfig::from_env();
            if let Some(base_url) = cli.base_url {
                config = config.with_base_url(base_url);
            }
            if let Some(model) = cli.model {
                config = config.with_model(model);
            }

            let api_key = match api_key {
                Some(key) => key,
                None if cli.mock_llm => "mock".to_string(),
                None => {
                    eprintln!("{API_KEY_WARNING}");
                    ask_secret("Enter your OpenAI API Key: ")?
                }
            };
            let topic = match topic {
                Some(topic) => topic,
                None => ask(
                    &mut std::io::stdin().lock(),
                    &mut std::io::stderr(),
                    "Enter the topic for your blog post: ",
                )?,
            };

            let (chat_client, image_client): (Arc<dyn ChatClient>, Arc<dyn ImageClient>) =
                if cli.mock_llm {
                    info!("Using mock chat and image clients");
                    (Arc::new(MockChatClient::new()), Arc::new(MockImageClient::new()))
                } else {
                    info!("Using {} with model {}", config.base_url, config.model);
                    (
                        Arc::new(OpenAiChatClient::new(&config)),
                        Arc::new(OpenAiImageClient::new(&config)),
                    )
                };

            let presenter = Arc::new(TerminalPresenter::stdout());
            let mut use_case = GenerateBlogPostUseCase::new(chat_client, prompts);
            if background {
                use_case = use_case.with_background(image_client);
            }
            if !json {
                use_case = use_case.with_observer(presenter.clone());
            }

            match use_case.execute(&topic, &api_key).await {
                Ok(post) if json => {
                    println!("{}", serde_json::to_string_pretty(&post)?);
                }
                Ok(_) => presenter.success(),
                Err(e) => {
                    presenter.error(&e.to_string());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
