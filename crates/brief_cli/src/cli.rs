use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use brief_core::artifacts::{artifact_path, latest_artifact};
use brief_core::{BriefRequest, EpisodeId, Error, Result};
use brief_feed::episode::DEFAULT_SHOW_TITLE;
use brief_feed::{nudge_feed, update_feed, FeedSettings, Upserted};
use brief_inference::headlines::{fetch_headlines, DEFAULT_SOURCES};
use brief_inference::{create_model, create_synthesizer, InferenceConfig, TtsConfig};
use brief_normalize::{normalize_brief, normalize_transcript, BriefSource, Normalized};
use brief_render::{html, spoken_text, subject_line, transcript};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

use crate::logging::Logger;

pub const DEFAULT_BASE_URL: &str = "https://kyledeguire.github.io/ai-news-audio-feed";
/// Episode dates follow the show's home timezone, not the runner's.
pub const DEFAULT_TIMEZONE: &str = "America/Denver";
const HEADLINE_LIMIT: usize = 12;

#[derive(Parser, Debug)]
#[command(author, version, about = "Weekly AI executive brief: draft, normalize, render and publish")]
pub struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the dated episode artifacts
    #[arg(long, env = "BRIEF_AUDIO_DIR", default_value = "audio", global = true)]
    pub audio_dir: PathBuf,

    /// IANA timezone that decides today's episode date
    #[arg(long, env = "BRIEF_TIMEZONE", default_value = DEFAULT_TIMEZONE, global = true)]
    pub timezone: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draft this week's brief, write its JSON and transcript, and synthesize audio
    Generate(GenerateArgs),
    /// Print the normalized document for a drafted brief
    Normalize {
        /// Drafted brief JSON
        input: PathBuf,
        /// Plain-text transcript used when the JSON carries no text
        #[arg(long)]
        transcript: Option<PathBuf>,
    },
    /// Render the HTML email body for the latest (or given) episode
    Compose {
        /// Episode stamp, YYYYMMDD or ai_news_YYYYMMDD
        #[arg(long)]
        stamp: Option<String>,
    },
    /// Publish the latest (or given) episode audio into the podcast feed
    UpdateFeed {
        /// Episode stamp, YYYYMMDD or ai_news_YYYYMMDD
        #[arg(long, env = "STAMP")]
        stamp: Option<String>,
        #[arg(long, env = "BRIEF_FEED_PATH", default_value = "feed.xml")]
        feed: PathBuf,
        #[arg(long, env = "BRIEF_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long, default_value = DEFAULT_SHOW_TITLE)]
        show_title: String,
    },
    /// Refresh the feed's lastBuildDate without touching its episodes
    NudgeFeed {
        #[arg(long, env = "BRIEF_FEED_PATH", default_value = "feed.xml")]
        feed: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Episode stamp, YYYYMMDD or ai_news_YYYYMMDD; defaults to today
    #[arg(long)]
    pub stamp: Option<String>,
    /// Drafting model: openai or dummy
    #[arg(long, env = "BRIEF_MODEL", default_value = brief_inference::DEFAULT_MODEL)]
    pub model: String,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,
    #[arg(long, env = "OPENAI_TEXT_MODEL")]
    pub text_model: Option<String>,
    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    pub elevenlabs_api_key: Option<String>,
    #[arg(long, env = "ELEVENLABS_VOICE_ID")]
    pub voice_id: Option<String>,
    #[arg(long, env = "ELEVENLABS_MODEL_ID")]
    pub tts_model: Option<String>,
    /// Target length in minutes
    #[arg(long, default_value_t = 4.5)]
    pub minutes: f32,
    /// Extra guidance for this week's brief
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Skip speech synthesis
    #[arg(long)]
    pub no_audio: bool,
    /// Do not fetch headline context
    #[arg(long)]
    pub no_headlines: bool,
}

impl GenerateArgs {
    fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            model_name: self.model.clone(),
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone(),
            text_model: self.text_model.clone(),
        }
    }

    fn tts_config(&self) -> TtsConfig {
        TtsConfig {
            api_key: self.elevenlabs_api_key.clone().unwrap_or_default(),
            voice_id: self.voice_id.clone().unwrap_or_default(),
            model_id: self.tts_model.clone(),
            base_url: None,
        }
    }
}

/// Runs one command, reporting any error. Failures map to a non-zero exit.
pub async fn run(cli: Cli, logger: &Logger) -> ExitCode {
    match handle_command(cli, logger).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error(&format!("❌ {}", e));
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

pub async fn handle_command(cli: Cli, logger: &Logger) -> Result<()> {
    let tz = parse_timezone(&cli.timezone)?;
    match cli.command {
        Commands::Generate(args) => generate(&cli.audio_dir, tz, &args, &logger.with_prefix("🎙️ [generate]")).await,
        Commands::Normalize { input, transcript } => normalize(&input, transcript.as_deref()),
        Commands::Compose { stamp } => compose(&cli.audio_dir, stamp.as_deref(), &logger.with_prefix("📰 [compose]")),
        Commands::UpdateFeed {
            stamp,
            feed,
            base_url,
            show_title,
        } => {
            let settings = FeedSettings::new(&base_url, show_title)?;
            publish(&cli.audio_dir, stamp.as_deref(), &feed, &settings, &logger.with_prefix("📡 [feed]"))
        }
        Commands::NudgeFeed { feed } => {
            let doc = nudge_feed(&feed, Utc::now())?;
            println!(
                "feed nudged: lastBuildDate={}, items={}",
                doc.last_build_date().unwrap_or_default(),
                doc.item_count()
            );
            Ok(())
        }
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| Error::Config(format!("Unknown timezone {:?}: {}", name, e)))
}

/// The episode whose date is `now` as seen in `tz`.
pub fn stamp_for(now: DateTime<Utc>, tz: Tz) -> EpisodeId {
    EpisodeId::new(now.with_timezone(&tz).date_naive())
}

/// Accepts `YYYYMMDD` or `ai_news_YYYYMMDD`; defaults to today in `tz`.
pub fn resolve_stamp(stamp: Option<&str>, tz: Tz) -> Result<EpisodeId> {
    match stamp.map(str::trim) {
        Some(s) if s.starts_with(brief_core::episode::GUID_PREFIX) => s.parse(),
        Some(s) => EpisodeId::from_stamp(s),
        None => Ok(stamp_for(Utc::now(), tz)),
    }
}

/// An explicit stamp, never defaulted to today.
fn explicit_stamp(stamp: &str) -> Result<EpisodeId> {
    resolve_stamp(Some(stamp), chrono_tz::UTC)
}

async fn generate(audio_dir: &Path, tz: Tz, args: &GenerateArgs, log: &Logger) -> Result<()> {
    let id = resolve_stamp(args.stamp.as_deref(), tz)?;
    let model = create_model(&args.inference_config()).await?;
    let synthesizer = if args.no_audio {
        None
    } else {
        Some(create_synthesizer(&args.tts_config())?)
    };

    let headlines = if args.no_headlines {
        Vec::new()
    } else {
        let sources: Vec<String> = DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect();
        let fetched = fetch_headlines(&reqwest::Client::new(), &sources, HEADLINE_LIMIT).await;
        if fetched.is_empty() {
            log.warn("No headlines fetched, drafting from notes only");
        }
        fetched
    };
    log.info(&format!("Drafting {} with {} ({} headlines)", id, model.name(), headlines.len()));

    let request = BriefRequest {
        episode: id,
        target_minutes: args.minutes,
        headlines,
        notes: args.notes.clone(),
    };
    log.debug(&format!("Target {} minutes, notes: {:?}", request.target_minutes, request.notes));
    let drafted = model.draft_brief(&request).await?;

    fs::create_dir_all(audio_dir)?;
    let json_path = artifact_path(audio_dir, id, "json");
    fs::write(&json_path, serde_json::to_string_pretty(&drafted)?)?;

    let normalized = normalize_brief(&drafted, None);
    if normalized.source == BriefSource::Empty {
        return Err(Error::Inference(format!("{} returned no usable brief text", model.name())));
    }
    log.info(&format!(
        "Normalized from {:?}: {} paragraphs, {} sources",
        normalized.source,
        normalized.document.paragraph_count(),
        normalized.document.footnotes.len()
    ));

    let txt_path = artifact_path(audio_dir, id, "txt");
    fs::write(&txt_path, transcript::render(&normalized.document))?;
    println!("JSON_PATH={}", json_path.display());
    println!("TRANSCRIPT={}", txt_path.display());

    if let Some(synthesizer) = synthesizer {
        let audio = synthesizer.synthesize(&spoken_text(&normalized.document)).await?;
        let mp3_path = artifact_path(audio_dir, id, "mp3");
        fs::write(&mp3_path, &audio)?;
        log.info(&format!("Wrote {} bytes of audio", audio.len()));
        println!("MP3_PATH={}", mp3_path.display());
    }
    Ok(())
}

/// Reads drafted JSON. A file that is not JSON is treated as carrying
/// nothing, so normalization moves on to the transcript.
fn read_brief_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!("⚠️ {} is not valid JSON ({}), ignoring it", path.display(), e);
        Value::Null
    }))
}

fn normalize(input: &Path, transcript_path: Option<&Path>) -> Result<()> {
    let value = read_brief_json(input)?;
    let transcript = transcript_path.map(fs::read_to_string).transpose()?;
    let normalized = normalize_brief(&value, transcript.as_deref());
    let out = json!({
        "source": normalized.source,
        "document": normalized.document,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn load_episode(audio_dir: &Path, stamp: Option<&str>) -> Result<(EpisodeId, Normalized)> {
    let id = match stamp {
        Some(s) => explicit_stamp(s)?,
        None => latest_artifact(audio_dir, "json")?
            .or(latest_artifact(audio_dir, "txt")?)
            .map(|(id, _)| id)
            .ok_or_else(|| {
                Error::Config(format!(
                    "No drafted brief found in {}. Run `brief generate` first.",
                    audio_dir.display()
                ))
            })?,
    };

    let json_path = artifact_path(audio_dir, id, "json");
    let txt_path = artifact_path(audio_dir, id, "txt");
    let transcript = if txt_path.exists() {
        Some(fs::read_to_string(&txt_path)?)
    } else {
        None
    };

    let normalized = if json_path.exists() {
        normalize_brief(&read_brief_json(&json_path)?, transcript.as_deref())
    } else {
        transcript.as_deref().map(normalize_transcript).ok_or_else(|| {
            Error::Config(format!("No brief JSON or transcript for {} in {}", id, audio_dir.display()))
        })?
    };
    Ok((id, normalized))
}

fn compose(audio_dir: &Path, stamp: Option<&str>, log: &Logger) -> Result<()> {
    let (id, normalized) = load_episode(audio_dir, stamp)?;
    if normalized.document.is_empty() {
        return Err(Error::Inference(format!("Brief {} has no usable text to compose", id)));
    }
    log.info(&format!(
        "Composing {} from {:?} ({} paragraphs)",
        id,
        normalized.source,
        normalized.document.paragraph_count()
    ));

    let html_path = artifact_path(audio_dir, id, "html");
    fs::write(&html_path, html::render(&normalized.document))?;

    println!("SUBJECT={}", subject_line(id));
    println!("HTML_BODY={}", html_path.display());
    let txt_path = artifact_path(audio_dir, id, "txt");
    if txt_path.exists() {
        println!("TRANSCRIPT={}", txt_path.display());
    }
    Ok(())
}

fn publish(audio_dir: &Path, stamp: Option<&str>, feed: &Path, settings: &FeedSettings, log: &Logger) -> Result<()> {
    let id = match stamp {
        Some(s) => explicit_stamp(s)?,
        None => latest_artifact(audio_dir, "mp3")?
            .map(|(id, _)| id)
            .ok_or_else(|| Error::MissingAudio(audio_dir.join("ai_news_YYYYMMDD.mp3")))?,
    };
    let audio = artifact_path(audio_dir, id, "mp3");

    let update = update_feed(feed, &id.guid(), &audio, settings, Utc::now())?;
    let verb = match update.outcome {
        Upserted::Inserted => "Added",
        Upserted::Replaced(_) => "Refreshed",
    };
    log.info(&format!("{} {} ({} items in feed)", verb, update.entry.guid, update.item_count));
    println!(
        "feed updated: enclosure={}, length={}, pubDate={}",
        update.entry.enclosure.url, update.entry.enclosure.length, update.entry.pub_date
    );
    Ok(())
}
