//! CLI for ProPhoto - AI resume headshots.

use clap::{Args, Parser, Subcommand, ValueEnum};
use prophoto::{
    build_instruction, BackgroundTone, GeminiEditor, GeminiModel, GenderHint, ImageEditor, Locale,
    SuitColor, TransformClient, TransformOptions, TransformationService,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prophoto")]
#[command(about = "Turn a personal photo into a professional resume headshot (Gemini)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a photo and export the headshot
    Transform(TransformArgs),

    /// Print the instruction that would be sent, without calling the API
    Prompt(StyleArgs),
}

#[derive(Args)]
struct StyleArgs {
    /// Gender style hint
    #[arg(short, long, value_enum, default_value = "unspecified")]
    gender: GenderArg,

    /// Suit color (navy, black, dark-grey, light, or any label)
    #[arg(short, long, default_value = SuitColor::NAVY)]
    suit: String,

    /// Studio backdrop tone
    #[arg(short, long, value_enum, default_value = "grey")]
    background: BackgroundArg,

    /// Language of the instruction and messages
    #[arg(long, value_enum, default_value = "en")]
    locale: LocaleArg,
}

#[derive(Args)]
struct TransformArgs {
    /// Path to the photo to transform
    input: PathBuf,

    /// Directory to write professional-resume-photo.png into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    #[command(flatten)]
    style: StyleArgs,

    /// Gemini model
    #[arg(short, long, value_enum, default_value = "flash")]
    model: ModelArg,

    /// API key (defaults to GEMINI_API_KEY, GOOGLE_API_KEY or API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Override the Gemini API base URL
    #[arg(long, env = "PROPHOTO_BASE_URL")]
    base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
    Unspecified,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackgroundArg {
    Grey,
    White,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocaleArg {
    En,
    Ko,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    Flash,
    Pro,
}

impl From<GenderArg> for GenderHint {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => GenderHint::Male,
            GenderArg::Female => GenderHint::Female,
            GenderArg::Unspecified => GenderHint::Unspecified,
        }
    }
}

impl From<BackgroundArg> for BackgroundTone {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::Grey => BackgroundTone::Grey,
            BackgroundArg::White => BackgroundTone::White,
        }
    }
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::Ko => Locale::Ko,
        }
    }
}

impl From<ModelArg> for GeminiModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Flash => GeminiModel::FlashImage,
            ModelArg::Pro => GeminiModel::ProImage,
        }
    }
}

impl StyleArgs {
    fn to_options(&self) -> anyhow::Result<TransformOptions> {
        Ok(TransformOptions::new()
            .with_gender(self.gender.into())
            .with_suit_color(SuitColor::new(&self.suit)?)
            .with_background(self.background.into())
            .with_locale(self.locale.into()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transform(args) => transform(args, cli.json).await?,
        Commands::Prompt(args) => print_prompt(args, cli.json)?,
    }

    Ok(())
}

async fn transform(args: TransformArgs, json_output: bool) -> anyhow::Result<()> {
    let options = args.style.to_options()?;

    let mut builder = GeminiEditor::builder().model(args.model.into());
    if let Some(key) = args.api_key {
        builder = builder.api_key(key);
    }
    if let Some(url) = args.base_url {
        builder = builder.base_url(url);
    }
    let service = TransformationService::new(builder.build()?);

    let mut client = TransformClient::with_options(options);
    if client.load_file(&args.input).await?.is_empty() {
        anyhow::bail!("{} is empty", args.input.display());
    }

    let state = client.start_transform(&service).await;
    if let Some(message) = state.error() {
        if json_output {
            let result = serde_json::json!({
                "success": false,
                "phase": state.phase(),
                "error": message,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        anyhow::bail!("{message}");
    }

    let path = client
        .export_result(&args.output_dir)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no headshot was produced"))?;
    let size = tokio::fs::metadata(&path).await?.len();

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "phase": client.state().phase(),
            "output": path.display().to_string(),
            "size_bytes": size,
            "editor": service.editor().kind().to_string(),
            "model": service.editor().model().as_str(),
            "options": client.options(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Saved headshot: {} ({} bytes) via {}",
            path.display(),
            size,
            service.editor().name()
        );
    }

    Ok(())
}

fn print_prompt(args: StyleArgs, json_output: bool) -> anyhow::Result<()> {
    let options = args.to_options()?;
    let instruction = build_instruction(&options);

    if json_output {
        let result = serde_json::json!({
            "options": options,
            "instruction": instruction,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{instruction}");
    }

    Ok(())
}
