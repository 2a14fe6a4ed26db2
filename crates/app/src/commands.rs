use std::error::Error;
use std::io::{self, Write};

use services::{AppServices, ImportRequest};
use vocab_core::flashcards::FlashcardDeck;
use vocab_core::model::{VocabularyEntry, WordSetId};
use vocab_core::quiz::{Question, QuizSession};

use crate::args::ImportSource;

type CmdResult = Result<(), Box<dyn Error>>;

/// Read one trimmed line; `None` on end of input.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// ─── Quiz ──────────────────────────────────────────────────────────────────

pub async fn quiz(services: &AppServices, fresh: bool) -> CmdResult {
    let quiz = services.quiz();

    let resumed = if fresh { None } else { quiz.resume().await? };
    let mut session = match resumed {
        Some(session) => {
            println!(
                "Resuming quiz at question {} of {}.",
                session.position() + 1,
                session.total()
            );
            session
        }
        None => quiz.start_active().await?,
    };
    println!("Type the answer, or a number for multiple choice. `:q` saves and quits.\n");

    loop {
        let answer = {
            let question = session.current_question()?;
            print_question(&session, question);
            let Some(line) = prompt("> ")? else {
                quiz.save_progress(&session).await?;
                println!();
                return Ok(());
            };
            if line == ":q" {
                quiz.save_progress(&session).await?;
                println!("Progress saved.");
                return Ok(());
            }
            resolve_choice(question, &line)
        };

        let outcome = quiz.answer(&mut session, &answer).await?;
        if outcome.feedback.correct {
            println!("Correct!\n");
        } else {
            println!(
                "Not quite. The answer is: {}\n",
                outcome.feedback.correct_answer
            );
        }

        if let Some(result) = outcome.result {
            if let Some(reason) = &outcome.recording_error {
                eprintln!("Could not save the result ({reason}), retrying.");
                quiz.record(&result).await?;
            }
            println!(
                "Quiz complete: {}/{} ({}%).",
                result.score,
                result.total,
                result.percentage()
            );
            let stats = services.stats().load().await?;
            println!("Gold: {}", stats.gold);
            return Ok(());
        }
    }
}

fn print_question(session: &QuizSession, question: &Question) {
    let entry = question.entry();
    println!("[{}/{}]", session.position() + 1, session.total());
    if question.is_choice() {
        println!("What does \"{}\" mean?", entry.term);
        for (index, option) in question.options().iter().enumerate() {
            println!("  {}. {option}", index + 1);
        }
    } else {
        println!("Type the Vietnamese meaning of \"{}\".", entry.term);
        if !entry.definition.is_empty() {
            println!("  hint: {}", entry.definition);
        }
    }
}

/// A bare number picks that option on a choice question.
fn resolve_choice(question: &Question, line: &str) -> String {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| question.options().get(index))
        .cloned()
        .unwrap_or_else(|| line.to_string())
}

// ─── Flashcards ────────────────────────────────────────────────────────────

pub async fn cards(services: &AppServices) -> CmdResult {
    let Some(words) = services.vault().active_words().await? else {
        println!("No active word list. Run `vocab sample` or `vocab import` first.");
        return Ok(());
    };
    let stats = services.stats();
    let mut deck = FlashcardDeck::new(words)?;

    loop {
        let entry = deck.current();
        println!("\n[{}/{}] {}", deck.position() + 1, deck.len(), entry.term);
        if !entry.level.is_empty() {
            println!("  band {}", entry.level);
        }
        if prompt("(enter to flip) ")?.is_none() {
            return Ok(());
        }
        print_back(entry);

        let Some(choice) = prompt("[k]nown, [l]earning, [p]revious, [q]uit: ")? else {
            return Ok(());
        };
        let moved = match choice.as_str() {
            "k" => {
                let current = stats.mark_known().await?;
                println!("Mastered: {}", current.mastered_count);
                deck.advance_after_rating()
            }
            "l" | "" => deck.advance_after_rating(),
            "p" => {
                deck.previous();
                true
            }
            "q" => return Ok(()),
            other => {
                println!("Unknown choice: {other}");
                true
            }
        };
        if !moved {
            println!("\nEnd of the list.");
            return Ok(());
        }
    }
}

fn print_back(entry: &VocabularyEntry) {
    println!("  {}", entry.translation);
    if !entry.definition.is_empty() {
        println!("  {}", entry.definition);
    }
    if !entry.example.is_empty() {
        println!("  \"{}\"", entry.example);
    }
    if !entry.collocations.is_empty() {
        println!("  collocations: {}", entry.collocations.join(", "));
    }
}

// ─── Vault ─────────────────────────────────────────────────────────────────

pub async fn sample(services: &AppServices) -> CmdResult {
    let words = services.vault().load_sample().await?;
    println!("Sample list active ({} words).", words.len());
    Ok(())
}

pub async fn sets(services: &AppServices) -> CmdResult {
    let sets = services.vault().list_sets().await?;
    if sets.is_empty() {
        println!("No saved sets.");
        return Ok(());
    }
    for set in sets {
        println!(
            "{}  {}  ({} words, {})",
            set.id(),
            set.name(),
            set.len(),
            set.created_at().format("%Y-%m-%d")
        );
    }
    Ok(())
}

pub async fn apply(services: &AppServices, id: WordSetId) -> CmdResult {
    let set = services.vault().apply_set(id).await?;
    println!("\"{}\" is now the active list ({} words).", set.name(), set.len());
    Ok(())
}

pub async fn delete(services: &AppServices, id: WordSetId) -> CmdResult {
    services.vault().delete_set(id).await?;
    println!("Deleted {id}.");
    Ok(())
}

pub async fn import(services: &AppServices, name: &str, source: ImportSource) -> CmdResult {
    let request = match source {
        ImportSource::File(path) => ImportRequest::Bulk(std::fs::read_to_string(path)?),
        ImportSource::Word { term, translation } => ImportRequest::Single { term, translation },
    };
    let set = services.imports().import(name, &request).await?;
    println!(
        "Saved \"{}\" ({} words) as {}; it is now the active list.",
        set.name(),
        set.len(),
        set.id()
    );
    Ok(())
}

// ─── Stats ─────────────────────────────────────────────────────────────────

pub async fn stats(services: &AppServices) -> CmdResult {
    let stats = services.stats().load().await?;
    println!("Gold:      {}", stats.gold);
    println!("Mastered:  {}", stats.mastered_count);
    println!("Learning:  {}", stats.learning_count);
    match stats.last_score {
        Some(score) => println!("Last quiz: {score}"),
        None => println!("Last quiz: -"),
    }
    Ok(())
}
