//! Note commands: add, edit, delete, show, list, stats.

use notevault_core::storage::NoteStore;
use notevault_core::{NewNote, NoteFilter, NotePatch, Priority};

use crate::app::AppContext;
use crate::cli::{AddArgs, DeleteArgs, EditArgs, ListArgs, ShowArgs, StatsArgs};
use crate::errors::CliError;
use crate::helpers::{parse_datetime, resolve_note_id};
use crate::output::{note_json, notes_json, print_note, print_note_list};
use crate::ui::short_id;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let (store, mut repository) = ctx.load()?;

    let mut new_note = NewNote::new(&args.title, &args.content)
        .tags(&args.tag)
        .attachments(&args.attach)
        .favorite(args.favorite);
    if let Some(priority) = &args.priority {
        new_note = new_note.priority(priority.parse::<Priority>()?);
    }
    if let Some(category) = &args.category {
        new_note = new_note.category(category);
    }
    if let Some(due) = &args.due {
        new_note = new_note.due_date(parse_datetime(due)?);
    }
    if let Some(reminder) = &args.reminder {
        new_note = new_note.reminder(parse_datetime(reminder)?);
    }

    let id = repository.add(new_note)?;
    store.save(&repository)?;

    if args.json {
        let note = repository.get(id)?;
        println!("{}", serde_json::to_string_pretty(&note_json(note)?)?);
    } else if ctx.quiet() {
        println!("{}", id);
    } else {
        println!("Added note {} ({})", short_id(&id), args.title);
    }
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let (store, mut repository) = ctx.load()?;
    let id = resolve_note_id(&repository, &args.id)?;

    let mut patch = NotePatch::new();
    if let Some(title) = &args.title {
        patch = patch.title(title);
    }
    if let Some(content) = &args.content {
        patch = patch.content(content);
    }
    if args.clear_tags {
        patch = patch.tags(Vec::<String>::new());
    } else if !args.tag.is_empty() {
        patch = patch.tags(&args.tag);
    }
    if let Some(priority) = &args.priority {
        patch = patch.priority(priority.parse::<Priority>()?);
    }
    if let Some(category) = &args.category {
        patch = patch.category(category);
    }
    if let Some(due) = &args.due {
        patch = patch.due_date(parse_datetime(due)?);
    }
    if args.clear_reminder {
        patch = patch.reminder(None);
    } else if let Some(reminder) = &args.reminder {
        patch = patch.reminder(Some(parse_datetime(reminder)?));
    }
    if !args.attach.is_empty() {
        patch = patch.attachments(&args.attach);
    }
    if let Some(favorite) = args.favorite {
        patch = patch.favorite(favorite);
    }
    if let Some(archived) = args.archived {
        patch = patch.archived(archived);
    }
    if patch.is_empty() {
        let message = "Nothing to change; pass at least one field flag";
        return Err(CliError::invalid_input(message).into());
    }

    repository.update(id, patch)?;
    store.save(&repository)?;

    if !ctx.quiet() {
        println!("Updated note {}", short_id(&id));
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let (store, mut repository) = ctx.load()?;
    let id = resolve_note_id(&repository, &args.id)?;

    let removed = repository.delete(id)?;
    store.save(&repository)?;

    if !ctx.quiet() {
        println!("Deleted note {} ({})", short_id(&removed.id), removed.title);
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let (_store, repository) = ctx.load()?;
    let id = resolve_note_id(&repository, &args.id)?;
    let note = repository.get(id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&note_json(note)?)?);
    } else {
        print_note(note, ctx.quiet());
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let (_store, repository) = ctx.load()?;

    let mut filter = NoteFilter::new();
    if let Some(search) = &args.search {
        filter = filter.search_text(search);
    }
    if let Some(priority) = &args.priority {
        if let Some(priority) = Priority::parse_filter(priority)? {
            filter = filter.priority(priority);
        }
    }
    if let Some(category) = &args.category {
        filter = filter.category(category);
    }
    if args.favorites {
        filter = filter.favorites_only();
    }
    if args.archived {
        filter = filter.archived_only();
    }

    let mut notes = repository.filter(&filter);
    if let Some(limit) = args.limit {
        notes.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&notes_json(notes)?)?);
    } else {
        print_note_list(&notes, ctx.quiet());
    }
    Ok(())
}

pub fn handle_stats(ctx: &AppContext, args: &StatsArgs) -> anyhow::Result<()> {
    let (_store, repository) = ctx.load()?;
    let stats = repository.statistics();
    let categories = repository.categories();

    if args.json {
        let output = serde_json::json!({
            "total": stats.total,
            "favorite_count": stats.favorite_count,
            "archived_count": stats.archived_count,
            "categories": categories,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Notes:     {}", stats.total);
    println!("Favorites: {}", stats.favorite_count);
    println!("Archived:  {}", stats.archived_count);
    if !categories.is_empty() {
        println!("Categories: {}", categories.join(", "));
    }
    Ok(())
}
