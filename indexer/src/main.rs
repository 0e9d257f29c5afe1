use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use corpus_core::{create_category, create_document, delete_document, get_index, update_document, NewDocument, Store};
use serde::Deserialize;
use time::macros::format_description;
use time::Date;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: u32,
    title: String,
    text: String,
    date: String,
    category: String,
}

impl InputDoc {
    fn into_new_document(self) -> Result<NewDocument> {
        let date = parse_date(&self.date).map_err(|e| anyhow!("document {}: {}", self.id, e))?;
        Ok(NewDocument { id: self.id, text: self.text, title: self.title, date, category: self.category })
    }
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Maintain a persistent inverted index over a document corpus", long_about = None)]
struct Cli {
    /// Directory holding the corpus store
    #[arg(long, env = "CORPUS_DATA_DIR", default_value = "./corpus-db", global = true)]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Create a document and index its text
    Create(DocArgs),
    /// Replace an existing document (delete then create)
    Update(DocArgs),
    /// Delete a document and its postings
    Delete {
        #[arg(long)]
        id: u32,
    },
    /// Create documents from a JSON/JSONL file or a directory of them
    Load {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the term -> "title:count" index as JSON
    ShowIndex,
}

#[derive(Subcommand)]
enum CategoryCommands {
    Add {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        name: String,
    },
}

#[derive(Args)]
struct DocArgs {
    #[arg(long)]
    id: u32,
    #[arg(long)]
    title: String,
    /// Publication date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    date: Date,
    /// Category name; must already exist
    #[arg(long)]
    category: String,
    #[arg(long, conflicts_with = "text_file", required_unless_present = "text_file")]
    text: Option<String>,
    /// Read the document text from a file
    #[arg(long)]
    text_file: Option<PathBuf>,
}

impl DocArgs {
    fn into_new_document(self) -> Result<NewDocument> {
        let text = match (self.text, self.text_file) {
            (Some(text), _) => text,
            (None, Some(path)) => fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?,
            (None, None) => return Err(anyhow!("either --text or --text-file is required")),
        };
        Ok(NewDocument { id: self.id, text, title: self.title, date: self.date, category: self.category })
    }
}

fn parse_date(s: &str) -> std::result::Result<Date, String> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("invalid date '{s}': {e}"))
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let store = Store::open(&cli.data_dir)
        .with_context(|| format!("opening store at {}", cli.data_dir.display()))?;

    let outcome = run(&store, cli.command);
    store.flush().context("flushing store")?;
    outcome
}

fn run(store: &Store, command: Commands) -> Result<()> {
    match command {
        Commands::Category { command: CategoryCommands::Add { id, name } } => {
            create_category(store, id, &name)?;
        }
        Commands::Create(args) => {
            let doc = args.into_new_document()?;
            create_document(store, &doc).with_context(|| format!("creating document {}", doc.id))?;
        }
        Commands::Update(args) => {
            let doc = args.into_new_document()?;
            update_document(store, &doc).with_context(|| format!("updating document {}", doc.id))?;
        }
        Commands::Delete { id } => {
            if !delete_document(store, id)? {
                tracing::warn!(id, "no such document");
            }
        }
        Commands::Load { input } => {
            let loaded = load_path(store, &input)?;
            tracing::info!(loaded, input = %input.display(), "load complete");
        }
        Commands::ShowIndex => {
            let index = get_index(store)?;
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
    }
    Ok(())
}

fn load_path(store: &Store, input: &Path) -> Result<usize> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        return Err(anyhow!("input {} does not exist", input.display()));
    }

    let mut loaded = 0;
    for file in files {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            let doc = doc.into_new_document()?;
            create_document(store, &doc)
                .with_context(|| format!("creating document {} from {}", doc.id, file.display()))?;
            loaded += 1;
        }
    }
    Ok(loaded)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(File::open(file)?))?;
    match json {
        serde_json::Value::Array(arr) => arr.into_iter().map(|v| Ok(serde_json::from_value(v)?)).collect(),
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value(json)?]),
        _ => Ok(Vec::new()),
    }
}
