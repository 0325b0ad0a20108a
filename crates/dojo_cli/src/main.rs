use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use dojo_core::quiz::Outcome;
use dojo_core::{Catalog, Config};

#[derive(Parser)]
#[command(name = "dojo")]
#[command(about = "Render martial-arts lessons and score quizzes")]
struct Cli {
    /// Config file (TOML); built-in defaults are used if it does not exist
    #[arg(short, long, global = true, default_value = "dojo.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a markup file to HTML or JSON
    Render {
        /// Input markup file
        input: PathBuf,

        /// Output file (defaults to input name with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },

    /// Print a lesson page (body, sections, sources) from a catalog snapshot as HTML
    Lesson {
        /// Catalog JSON snapshot
        catalog: PathBuf,
        slug: String,
    },

    /// Search the glossary
    Terms {
        /// Catalog JSON snapshot
        catalog: PathBuf,
        /// Hebrew, English or romaji text to look for
        #[arg(default_value = "")]
        query: String,
    },

    /// Score answers to a quiz
    Quiz {
        /// Catalog JSON snapshot
        catalog: PathBuf,
        quiz_id: String,
        /// Chosen option, as QUESTION_ID=INDEX (repeatable)
        #[arg(short, long = "answer", value_parser = parse_answer)]
        answers: Vec<(String, usize)>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Json => "json",
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::Render {
            input,
            output,
            format,
        } => render(&input, output, format, &config),
        Command::Lesson { catalog, slug } => lesson(&catalog, &slug, &config),
        Command::Terms { catalog, query } => terms(&catalog, &query),
        Command::Quiz {
            catalog,
            quiz_id,
            answers,
        } => quiz(&catalog, &quiz_id, &answers, &config),
    }
}

fn render(input: &Path, output: Option<PathBuf>, format: Format, config: &Config) -> Result<()> {
    let markup = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;

    let blocks = dojo_core::parse(&markup);
    let rendered = match format {
        Format::Html => dojo_core::blocks_to_html(&blocks, config),
        Format::Json => serde_json::to_string_pretty(&blocks)?,
    };

    // Determine output path
    let output = output.unwrap_or_else(|| input.with_extension(format.extension()));

    fs::write(&output, rendered).with_context(|| format!("writing {}", output.display()))?;

    println!("Created {}", output.display());
    Ok(())
}

fn lesson(catalog: &Path, slug: &str, config: &Config) -> Result<()> {
    let catalog = Catalog::load(catalog)?;
    let lesson = catalog
        .lesson_by_slug(slug)
        .ok_or_else(|| anyhow!("no lesson with slug {slug:?}"))?;

    println!("{} [{}]", lesson.title, lesson.category.as_str());
    if let Some(belt) = catalog.belt(&lesson.belt_id) {
        println!("{} / {}", belt.name_en, belt.name_he);
    }
    println!();
    print!("{}", dojo_core::lesson_to_html(lesson, config));
    Ok(())
}

fn terms(catalog: &Path, query: &str) -> Result<()> {
    let catalog = Catalog::load(catalog)?;
    let terms = catalog.search_terms(query);
    if terms.is_empty() {
        println!("No terms match {query:?}");
        return Ok(());
    }

    for term in terms {
        let romaji = term.romaji.as_deref().unwrap_or("-");
        println!("{}\t{}\t{}", term.term_he, romaji, term.term_en);
        if let Some(description) = term.description() {
            println!("\t{description}");
        }
    }
    Ok(())
}

fn quiz(catalog: &Path, quiz_id: &str, answers: &[(String, usize)], config: &Config) -> Result<()> {
    let catalog = Catalog::load(catalog)?;
    let mut session = catalog
        .start_quiz(quiz_id)
        .ok_or_else(|| anyhow!("no quiz with id {quiz_id:?}"))?
        .with_default_pass_score(config.quiz.default_pass_score);

    for (question_id, option) in answers {
        if !session.select(question_id, *option) {
            log::warn!("answer {question_id}={option} does not match any option");
        }
    }
    if !session.submit() {
        bail!("quiz {quiz_id:?} has no questions");
    }

    println!("{}", session.quiz().title);
    for (n, question) in session.questions().iter().enumerate() {
        let mark = match session.outcome(&question.id) {
            Some(Outcome::Correct) => "correct",
            Some(Outcome::Wrong) => "wrong",
            Some(Outcome::Unanswered) | None => "unanswered",
        };
        println!("{:>3}. {} ... {}", n + 1, question.prompt, mark);
        if let Some(explanation) = &question.explanation {
            println!("     {explanation}");
        }
    }

    let result = session
        .result()
        .context("quiz was submitted but has no result")?;
    println!(
        "Score: {}% ({}/{}), pass mark {}% - {}",
        result.score,
        result.correct,
        result.total,
        session.pass_score(),
        if result.passed { "passed" } else { "not passed" }
    );
    Ok(())
}

fn parse_answer(s: &str) -> Result<(String, usize), String> {
    let (question, option) = s
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION_ID=INDEX, got {s:?}"))?;
    let option = option
        .trim()
        .parse()
        .map_err(|e| format!("bad option index in {s:?}: {e}"))?;
    Ok((question.trim().to_string(), option))
}
