use std::io::Write;

use honeypad_core::{
    core_version, parse_note_reference, resolve_deep_link, EditTarget, Note, NoteFields,
    NoteOrder, NoteQuery, NoteStore, NoteSummary,
};
use log::info;

use crate::cli::Commands;
use crate::error::CliError;

pub fn execute(command: Commands, store: &NoteStore, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Commands::Add { title, body } => {
            let id = store.insert(&NoteFields { title, body })?;
            info!("event=cli_add module=cli status=ok");
            writeln!(out, "{id}")?;
        }
        Commands::List {
            contains,
            limit,
            desc,
            json,
        } => {
            let query = NoteQuery {
                title_contains: contains,
                order: if desc {
                    NoteOrder::TitleDesc
                } else {
                    NoteOrder::TitleAsc
                },
                limit,
                offset: 0,
            };
            let summaries: Vec<NoteSummary> = store.query_summaries(&query)?.collect();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
            } else {
                for summary in &summaries {
                    writeln!(out, "{}\t{}", summary.id, summary.title)?;
                }
            }
        }
        Commands::Show { note, json } => {
            let id = parse_note_reference(&note)
                .ok_or_else(|| CliError::InvalidNoteReference(note.clone()))?;
            let found = store
                .query_by_id(id)?
                .ok_or(CliError::NoteNotFound(note))?;
            print_note(out, &found, json)?;
        }
        Commands::Edit { id, title, body } => {
            if title.is_none() && body.is_none() {
                return Err(CliError::NothingToUpdate);
            }
            if store.update(id, &NoteFields { title, body })? == 0 {
                return Err(CliError::NoteNotFound(id.to_string()));
            }
            writeln!(out, "{id}")?;
        }
        Commands::Delete { ids } => {
            let deleted = store.delete_many(&ids)?;
            info!(
                "event=cli_delete module=cli status=ok requested={} deleted={deleted}",
                ids.len()
            );
            writeln!(out, "{deleted}")?;
        }
        Commands::Open { note, json } => match resolve_deep_link(store, note.as_deref())? {
            EditTarget::Existing(found) => print_note(out, &found, json)?,
            EditTarget::New if json => writeln!(out, "null")?,
            EditTarget::New => writeln!(out, "new note")?,
        },
        Commands::Version => {
            writeln!(out, "honeypad_core version={}", core_version())?;
        }
    }
    Ok(())
}

fn print_note(out: &mut dyn Write, note: &Note, json: bool) -> Result<(), CliError> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(note)?)?;
    } else {
        writeln!(out, "{}\t{}", note.id, note.title)?;
        if !note.body.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", note.body)?;
        }
    }
    Ok(())
}
