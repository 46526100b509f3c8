// File: src/bin/main.rs
use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use slang_core::config::AppConfig;
use slang_core::core::comments::{ExplanationState, FeedbackKind};
use slang_core::core::display::{extract_video_id, format_count, truncate};
use slang_core::core::engine::RefreshNotice;
use slang_core::core::lexicon::Lexicon;
use slang_core::core::tokenizer::Token;
use slang_core::core::tooltip::TooltipContent;
use slang_core::core::types::{VocabSet, Video};
use slang_core::gateway::HttpGateway;
use slang_core::persistence::{FileStorage, MemoryStorage, SessionStorage};
use slang_core::SlangEngine;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slangfeed")]
#[command(about = "Learn slang from short-form video comments", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Backend base URL (overrides config and environment)
    #[arg(long)]
    api_url: Option<String>,
    /// Persist the vocabulary in this directory
    #[arg(long)]
    session_dir: Option<PathBuf>,
    /// Load videos from a local JSON file instead of the backend
    #[arg(long)]
    feed: Option<PathBuf>,
    /// Ask the backend for its default feed instead of the configured topics
    #[arg(long)]
    default_feed: bool,
    /// Feed topic, repeatable (replaces the configured topics)
    #[arg(long = "topic", value_name = "TOPIC")]
    topics: Vec<String>,
    /// Extra slang to look for, repeatable
    #[arg(long = "slang", value_name = "TERM")]
    slang: Vec<String>,
}

const HELP: &str = "\
n / p            next / previous video      goto <i>      jump to video i
wheel <dy>       scroll                      swipe <y0> <y1>  touch swipe
c                open/close comments         say <text>    set draft
chip <n>         add suggested slang n       send          submit draft
explain <n>      explain comment n           hover <word>  show definition
leave            pointer leaves the word     lock / unlock pointer enters/leaves tooltip
learn / know     classify hovered word       vocab         my slang
forget <term>    drop from learning set      promote <term> learning|known
suggest          fetch suggestions           translate [f]  translate, save audio
refresh          discover new slang          quit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref());
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if cli.session_dir.is_some() {
        config.session_dir = cli.session_dir;
    }
    if !cli.topics.is_empty() {
        config.feed.topics = cli.topics;
    }
    if !cli.slang.is_empty() {
        config.feed.custom_slang = cli.slang;
    }
    config.feed = config.feed.normalized();

    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to built-in lexicon");
            Lexicon::builtin().clone()
        }),
        None => Lexicon::builtin().clone(),
    };
    let storage: Box<dyn SessionStorage> = match &config.session_dir {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    };
    let gateway = HttpGateway::new(&config.api_base_url, config.request_timeout())?;
    let feed_request = config.feed.clone();
    let mut engine = SlangEngine::new(config, Arc::new(lexicon), Box::new(gateway), storage);

    let mut status = match &cli.feed {
        Some(path) => {
            let videos: Vec<Video> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            engine.load_feed(videos);
            format!("Loaded feed from {}", path.display())
        }
        None => {
            let request = if cli.default_feed { None } else { Some(&feed_request) };
            match engine.fetch_feed(request) {
                Ok(count) => format!("Fetched {count} videos"),
                Err(e) => format!("Could not load videos: {e}"),
            }
        }
    };
    engine.load_slang_total();

    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;
    let mut show_vocab = false;

    loop {
        engine.tick(now_ms());
        print_ui(&engine, &status, show_vocab, now_ms())?;
        status.clear();

        let mut input = String::new();
        if stdin().lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let now = now_ms();
        engine.tick(now);

        match cmd {
            "quit" | "exit" => break,
            "help" | "?" => status = HELP.to_string(),
            "n" | "next" => {
                engine.advance();
            }
            "p" | "prev" => {
                engine.retreat();
            }
            "goto" => match rest.parse::<usize>() {
                Ok(i) if i > 0 => {
                    engine.go_to(i - 1);
                }
                _ => status = "usage: goto <n>".to_string(),
            },
            "wheel" => match rest.parse::<f32>() {
                Ok(dy) => {
                    if !engine.wheel(dy) && engine.comments().panel_open() {
                        status = "Close the comments first (c)".to_string();
                    }
                }
                Err(_) => status = "usage: wheel <dy>".to_string(),
            },
            "swipe" => {
                let ys: Vec<f32> = rest.split_whitespace().filter_map(|s| s.parse().ok()).collect();
                if let [from, to] = ys[..] {
                    engine.touch_start(from);
                    engine.touch_move(to);
                    engine.touch_end();
                } else {
                    status = "usage: swipe <start_y> <end_y>".to_string();
                }
            }
            "c" | "comments" => {
                if engine.comments().panel_open() {
                    engine.close_comments();
                } else {
                    engine.open_comments();
                }
            }
            "say" => engine.set_draft(rest),
            "chip" => {
                let chosen = rest
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| engine.suggested_slang().get(n.wrapping_sub(1)).map(|s| s.to_string()));
                match chosen {
                    Some(term) => engine.add_slang_to_draft(&term),
                    None => status = "No such suggestion".to_string(),
                }
            }
            "send" => {
                if !engine.submit_comment(now) {
                    status = "Nothing to send".to_string();
                }
            }
            "explain" => {
                let id = rest.parse::<usize>().ok().and_then(|n| {
                    engine
                        .current_video()
                        .and_then(|v| v.comments_with_slang.get(n.wrapping_sub(1)))
                        .map(|c| c.comment_id.clone())
                });
                match id {
                    Some(id) => {
                        engine.explain_comment(&id);
                    }
                    None => status = "No such comment".to_string(),
                }
            }
            "hover" if rest.is_empty() => status = "usage: hover <word>".to_string(),
            "hover" => {
                let context = engine.current_video().map(|v| v.title.clone()).unwrap_or_default();
                engine.hover_word(rest, &context);
            }
            "leave" => engine.hover_leave(now),
            "lock" => engine.tooltip_panel_enter(),
            "unlock" => engine.tooltip_panel_leave(),
            "learn" | "know" => match engine.tooltip().word().map(str::to_string) {
                Some(word) => {
                    let target = if cmd == "learn" { VocabSet::Learning } else { VocabSet::Known };
                    if engine.classify(&word, target) {
                        status = format!("Saved '{word}'");
                    }
                }
                None => status = "Hover a word first".to_string(),
            },
            "vocab" => show_vocab = !show_vocab,
            "forget" => {
                if !engine.remove_term(rest, VocabSet::Learning) {
                    engine.remove_term(rest, VocabSet::Known);
                }
            }
            "promote" => {
                let (term, set) = rest.rsplit_once(' ').unwrap_or((rest, ""));
                let target = match set {
                    "known" => Some(VocabSet::Known),
                    "learning" => Some(VocabSet::Learning),
                    _ => None,
                };
                match target {
                    Some(target) if engine.promote_term(term, target) => {
                        status = format!("Moved '{term}'");
                    }
                    Some(_) => status = format!("'{term}' is not in the other list"),
                    None => status = "usage: promote <term> learning|known".to_string(),
                }
            }
            "suggest" => {
                engine.load_suggestions();
                show_vocab = true;
            }
            "translate" => {
                if !engine.translate_current() {
                    status = "Translation not available".to_string();
                } else if let (Some(translation), false) = (engine.translation(), rest.is_empty()) {
                    status = match std::fs::write(rest, &translation.audio) {
                        Ok(()) => format!("Audio saved to {rest}"),
                        Err(e) => format!("Could not save audio: {e}"),
                    };
                }
            }
            "refresh" => engine.refresh_slang(now),
            "" => {}
            other => status = format!("Unknown command '{other}', try help"),
        }
    }

    println!("\nBye!");
    Ok(())
}

fn print_ui(
    engine: &SlangEngine,
    status: &str,
    show_vocab: bool,
    now_ms: u64,
) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let total = engine
        .slang_total()
        .map(|t| format!(" | {t} slang terms tracked"))
        .unwrap_or_default();
    writeln!(out, "{}{}", "slangfeed".bold().magenta(), total)?;
    writeln!(out, "---------------------------------------------------------------")?;

    if show_vocab {
        print_vocab(engine, &mut out)?;
    } else {
        print_video(engine, &mut out, now_ms)?;
    }

    if let Some(notice) = engine.refresh_notice() {
        let line = match notice {
            RefreshNotice::Discovered(terms) => {
                format!("New slang discovered: {}", terms.join(", ")).green()
            }
            RefreshNotice::UpToDate => "Slang database is up to date".to_string().green(),
            RefreshNotice::Failed(e) => e.clone().red(),
        };
        writeln!(out, "\n{line}")?;
    }
    if !status.is_empty() {
        writeln!(out, "\n{status}")?;
    }
    write!(out, "\n> ")?;
    out.flush()
}

fn print_video(engine: &SlangEngine, out: &mut impl Write, now_ms: u64) -> std::io::Result<()> {
    let Some(video) = engine.current_video() else {
        writeln!(out, "No videos available. Load some shorts data to get started.")?;
        return Ok(());
    };
    writeln!(
        out,
        "[{}/{}] {}",
        engine.current_index() + 1,
        engine.videos().len(),
        video.display_title().bold()
    )?;
    writeln!(
        out,
        "{} | {} views | {} likes | {} comments",
        video.channel,
        format_count(video.view_count),
        format_count(video.like_count),
        format_count(video.comment_count)
    )?;
    if let Some(id) = extract_video_id(&video.url) {
        writeln!(out, "https://www.youtube.com/embed/{id}")?;
    }
    if let Some(translation) = engine.translation() {
        writeln!(out, "{} {}", "Translated:".cyan(), translation.text)?;
    }

    let chips = engine.suggested_slang();
    if !chips.is_empty() {
        let chips: Vec<String> = chips
            .iter()
            .enumerate()
            .map(|(i, s)| format!("[{}:{}]", i + 1, s))
            .collect();
        writeln!(out, "Try: {}", chips.join(" "))?;
    }

    let comments = engine.comments();
    if comments.panel_open() {
        writeln!(out, "\n{}", "Comments".underlined())?;
        for (i, comment) in video.comments_with_slang.iter().enumerate() {
            write!(out, "{:>2}. {}: ", i + 1, comment.author.clone().bold())?;
            for token in engine.tokenize(&comment.text) {
                match token {
                    Token::Plain(text) => write!(out, "{text}")?,
                    Token::Word { text, learned: true, .. } => write!(out, "{}", text.green())?,
                    Token::Word { text, known: true, .. } => write!(out, "{}", text.dim())?,
                    Token::Word { text, .. } => write!(out, "{}", text.cyan().underlined())?,
                }
            }
            writeln!(out, "  ({} likes)", format_count(comment.like_count))?;
            match comments.explanation(&comment.comment_id) {
                Some(ExplanationState::Loading) => writeln!(out, "    ...")?,
                Some(ExplanationState::Explained { explanation, visible: true }) => {
                    writeln!(out, "    {}", explanation.translation.clone().italic())?;
                    for item in &explanation.slang_breakdown {
                        writeln!(out, "      {} - {}", item.term.clone().yellow(), item.definition)?;
                    }
                }
                Some(ExplanationState::Failed { message, visible: true }) => {
                    writeln!(out, "    {}", message.clone().red())?
                }
                _ => {}
            }
        }
        for mine in comments.submitted() {
            writeln!(out, "  You: {} ({} likes)", mine.text, mine.likes)?;
            for reply in &mine.ai_responses {
                writeln!(out, "    {}: {}", reply.author_name.clone().bold(), reply.ai_comment)?;
            }
        }
        if let Some(typing) = comments.typing_text(now_ms) {
            writeln!(out, "  ... {typing}")?;
        }
        let draft_label = if comments.is_submitting() { "Sending" } else { "Draft" };
        writeln!(out, "\n{draft_label}: {}", comments.draft())?;
    }

    if let Some(word) = engine.tooltip().word() {
        let lock = if engine.tooltip().is_locked() { " (locked)" } else { "" };
        let body = match engine.tooltip().content() {
            Some(TooltipContent::Ready(def)) => format!("{} e.g. \"{}\"", def.definition, def.example),
            Some(TooltipContent::Unavailable) => "Definition not available".to_string(),
            _ => "Loading...".to_string(),
        };
        writeln!(out, "\n{}{}: {}", word.yellow().bold(), lock, body)?;
    }

    if let Some(feedback) = comments.feedback() {
        let headline = format!("{} (score {})", feedback.message, feedback.score);
        match feedback.kind {
            FeedbackKind::Success => {
                writeln!(out, "\n{}", headline.green())?;
                if let (Some(g), Some(c), Some(n)) =
                    (feedback.grammar_score, feedback.context_score, feedback.naturalness_score)
                {
                    writeln!(out, "grammar {g} | context {c} | naturalness {n}")?;
                }
                if !feedback.correction.is_empty() {
                    writeln!(out, "Correction: {}", feedback.correction)?;
                }
                for part in &feedback.good_parts {
                    writeln!(out, "  + {part}")?;
                }
                for mistake in &feedback.mistakes {
                    writeln!(out, "  - {mistake}")?;
                }
            }
            FeedbackKind::Error => writeln!(out, "\n{}", feedback.message.clone().red())?,
        }
    }
    Ok(())
}

fn print_vocab(engine: &SlangEngine, out: &mut impl Write) -> std::io::Result<()> {
    let vocab = engine.vocabulary();
    let learned = vocab.entries().len();
    writeln!(
        out,
        "{} - {} {} learned",
        "My Slang".bold(),
        learned,
        if learned == 1 { "term" } else { "terms" }
    )?;
    if learned == 0 {
        writeln!(out, "No slang learned yet. Hover words in comments and 'learn' them.")?;
    }
    for entry in vocab.entries() {
        writeln!(out, "  {} - {}", entry.term.clone().bold(), entry.definition)?;
        if !entry.example.is_empty() {
            writeln!(out, "      \"{}\"", entry.example)?;
        }
        if !entry.video_title.is_empty() {
            writeln!(out, "      From: {}", truncate(&entry.video_title, 30))?;
        }
    }
    if !vocab.known().is_empty() {
        writeln!(out, "\nAlready know: {}", vocab.known().join(", "))?;
    }
    if !engine.suggestions().is_empty() {
        writeln!(out, "\n{}", "Suggested for you".underlined())?;
        for s in engine.suggestions() {
            writeln!(out, "  {} [{}] {}", s.term.clone().bold(), s.category, s.definition)?;
            writeln!(out, "      {}", s.reason.clone().italic())?;
        }
    }
    Ok(())
}
