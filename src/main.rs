// word-calendar - a vocabulary log for the terminal
//
// This is the main entry point. Parses CLI args and dispatches to handlers.
// Each handler loads the word list fresh, like opening a page.

use chrono::{Datelike, Local, NaiveDate};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use word_calendar_lib::{
    core::{DeletionOutcome, ListSession, WordStore},
    intelligence::{AllWordsView, CalendarMonth, CalendarView, ListPage, RankingRow, RecentView},
    logging, Config, Database, Result, WordCalendarError,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = Config::from_env()?;
    logging::init_tracing(&config.log_level);

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    let result = match command.as_str() {
        "add" => handle_add(&config, &args[2..]).await,
        "recent" => handle_recent(&config).await,
        "calendar" => handle_calendar(&config, &args[2..]).await,
        "list" => handle_list(&config, &args[2..]).await,
        "delete" => handle_delete(&config, &args[2..]).await,
        "words" => handle_words(&config).await,
        "define" => handle_define(&args[2..]),
        "status" => handle_status(&config).await,
        "version" | "-v" | "--version" => {
            println!("word-calendar v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    };

    // Validation problems are reported, not fatal
    match result {
        Err(e) if e.is_validation() => {
            eprintln!("{}", e.user_message());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Err(e)
        }
        ok => ok,
    }
}

async fn open_store(config: &Config) -> Result<WordStore> {
    let db = Database::new(config.db_path()).await?;
    WordStore::load(Arc::new(db), config.storage_key.clone()).await
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| WordCalendarError::InvalidDate(value.to_string()))
}

async fn handle_add(config: &Config, args: &[String]) -> Result<()> {
    let word = args.join(" ");
    let mut store = open_store(config).await?;

    let record = store.append(&word).await?;
    println!("Added \"{}\" ({})", record.word, record.iso_date());

    print_recent(&RecentView::build(store.records()));
    Ok(())
}

async fn handle_recent(config: &Config) -> Result<()> {
    let store = open_store(config).await?;
    print_recent(&RecentView::build(store.records()));
    Ok(())
}

fn print_recent(view: &RecentView) {
    if view.is_empty() {
        println!("No words added yet.");
        return;
    }

    println!("\nRecent words:");
    println!("{}", "=".repeat(60));
    for record in &view.records {
        println!("  {} ({})", record.word, record.iso_date());
    }
    println!("{}", "=".repeat(60));
}

async fn handle_calendar(config: &Config, args: &[String]) -> Result<()> {
    let today = Local::now().date_naive();
    let month = match args.first() {
        Some(value) => CalendarMonth::parse(value)?,
        None => CalendarMonth::current(today),
    };

    let store = open_store(config).await?;
    let view = CalendarView::build(store.records(), month, today);

    println!("\n{:^34}", view.month.title());
    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    let mut column = 0;
    let mut line = String::new();
    for _ in 0..view.leading_blanks {
        line.push_str("     ");
        column += 1;
    }
    for cell in &view.cells {
        let marker = if cell.is_today { '*' } else { ' ' };
        line.push_str(&format!("{}{:>2}:{}", marker, cell.date.day(), cell.level));
        column += 1;
        if column % 7 == 0 {
            println!("{}", line);
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line);
    }
    println!("(day:level, level 0-8, * = today)");

    let busy: Vec<_> = view.cells.iter().filter(|c| c.count > 0).collect();
    if !busy.is_empty() {
        println!("\nDays with words:");
        for cell in busy {
            println!("  {}  {} word(s)  level {}", cell.date, cell.count, cell.level);
        }
        println!("\nOpen a day with: word-calendar list <YYYY-MM-DD>");
    }
    if let Some(prev) = view.month.shift(-1) {
        println!("Prev: word-calendar calendar {}", prev.title());
    }
    if let Some(next) = view.month.shift(1) {
        println!("Next: word-calendar calendar {}", next.title());
    }

    Ok(())
}

fn print_list_page(page: &ListPage) {
    println!("\n{}", page.header());
    println!("{}", "=".repeat(60));

    match page {
        ListPage::Missing => {}
        ListPage::Empty(_) => println!("No words were added on this day."),
        ListPage::Groups(_, groups) => {
            let mut n = 0;
            for (letter, records) in groups {
                println!("\nLetter: {}", letter);
                for record in records {
                    n += 1;
                    println!("  {:3}. {}", n, record.word);
                }
            }
        }
    }
    println!("{}", "=".repeat(60));
}

fn print_ranking(ranking: &[RankingRow]) {
    if ranking.is_empty() {
        return;
    }

    println!("\nTop words:");
    for row in ranking {
        println!("  {:2}. {:<30} {} time(s)", row.rank, row.word, row.count);
    }
}

async fn handle_list(config: &Config, args: &[String]) -> Result<()> {
    let date = args.first().map(|d| parse_date(d)).transpose()?;

    let store = open_store(config).await?;
    let mut session = ListSession::new(store, date);

    print_list_page(&session.render());
    print_ranking(&session.ranking());
    if session.date().is_some() {
        println!("\n{}: word-calendar delete <date> <n> [n...]", session.button_label());
    }

    Ok(())
}

async fn handle_delete(config: &Config, args: &[String]) -> Result<()> {
    let mut date: Option<NaiveDate> = None;
    let mut picks: Vec<usize> = Vec::new();
    let mut assume_yes = false;

    for arg in args {
        match arg.as_str() {
            "--yes" | "-y" => assume_yes = true,
            value if date.is_none() => date = Some(parse_date(value)?),
            value => match value.parse::<usize>() {
                Ok(n) if n > 0 => picks.push(n),
                _ => eprintln!("  (ignoring '{}': not a list number)", value),
            },
        }
    }

    let date = date.ok_or(WordCalendarError::MissingDate)?;

    let store = open_store(config).await?;
    let mut session = ListSession::new(store, Some(date));
    let page = session.render();
    let shown = page.records();

    // First pick is a plain click, the rest are modifier clicks
    for (i, n) in picks.iter().enumerate() {
        match shown.get(n - 1) {
            Some(record) => {
                session.click(record.timestamp, i > 0);
            }
            None => eprintln!("  (no word #{} on {})", n, date),
        }
    }

    let outcome = session
        .delete_selected(|message| assume_yes || ask(message))
        .await?;

    match outcome {
        DeletionOutcome::Cancelled => println!("Nothing deleted."),
        DeletionOutcome::Deleted { removed, page, ranking } => {
            println!("Deleted {} word(s).", removed);
            print_list_page(&page);
            print_ranking(&ranking);
        }
    }

    Ok(())
}

fn ask(message: &str) -> bool {
    print!("{} [y/N] ", message);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn handle_words(config: &Config) -> Result<()> {
    let store = open_store(config).await?;
    let view = AllWordsView::build(store.records());

    if view.stats.total == 0 {
        println!("No words added yet.");
        return Ok(());
    }

    println!("\nAll words");
    println!("{}", "=".repeat(60));
    println!("Total entries: {}   Distinct words: {}", view.stats.total, view.stats.unique);

    for (letter, words) in &view.index {
        println!("\nLetter: {}", letter);
        for word in words {
            println!("  {}", word);
        }
    }
    println!("{}", "=".repeat(60));

    print_ranking(&view.ranking);
    Ok(())
}

fn handle_define(args: &[String]) -> Result<()> {
    let word = args.join(" ");
    let word = word.trim();
    if word.is_empty() {
        return Err(WordCalendarError::InvalidWord("empty word".to_string()));
    }

    println!("{}", word_calendar_lib::intelligence::definition_url(word));
    Ok(())
}

async fn handle_status(config: &Config) -> Result<()> {
    let db = Database::new(config.db_path()).await?;
    let stats = db.stats().await?;
    let entry = db.get_entry(&config.storage_key).await?;

    println!("\nword-calendar Status");
    println!("{}", "=".repeat(60));
    println!("  Database:     {}", db.path().display());
    println!("  Storage key:  {}", config.storage_key);
    println!("  Stored keys:  {}", stats.total_keys);
    println!(
        "  Connections:  {} open, {} idle",
        stats.pool_size, stats.idle_connections
    );
    match entry {
        Some(entry) => println!("  Last write:   {}", entry.updated_at),
        None => println!("  Last write:   never"),
    }

    let store = WordStore::load(Arc::new(db), config.storage_key.clone()).await?;
    println!("  Words:        {}", store.len());
    println!("{}", "=".repeat(60));

    Ok(())
}

fn print_usage() {
    println!(
        r#"word-calendar v{} - Every word you look up, on a calendar

USAGE:
    word-calendar <COMMAND> [OPTIONS]

COMMANDS:
    add <word>                  Add a word (stamped with today's date)
    recent                      Show all words, newest first
    calendar [YYYY-MM]          Show the month heatmap (default: this month)
    list <YYYY-MM-DD>           Show that day's words, A-Z, plus top words
    delete <YYYY-MM-DD> <n>...  Delete words by their number in 'list'
                                (add --yes to skip the confirmation)
    words                       A-Z index of every distinct word
    define <word>               Print a translator link for a word
    status                      Show storage location and stats
    version                     Show version
    help                        Show this help

EXAMPLES:
    word-calendar add serendipity
    word-calendar calendar 2024-02
    word-calendar list 2024-02-14
    word-calendar delete 2024-02-14 1 3

ENVIRONMENT:
    WORD_CALENDAR_HOME   Data directory (default: ~/.word-calendar)
    WORD_CALENDAR_KEY    Storage key for the word list (default: wordsData)
    RUST_LOG             Log filter (default: warn)
"#,
        env!("CARGO_PKG_VERSION")
    );
}
