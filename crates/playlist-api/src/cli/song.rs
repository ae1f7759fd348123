//! Song catalog CLI commands: create, list, show, delete.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};

use playlist_types::classification::{MelodyType, SongCategory};
use playlist_types::song::{Melody, MelodyId, Song, SongId};

use crate::cli::CreateSongArgs;
use crate::state::AppState;

/// Create a new song via interactive prompts, one-shot flags, or a JSON file.
///
/// # Examples
///
/// ```bash
/// # Interactive prompts
/// playlist create song
///
/// # One-shot with flags
/// playlist create song --title "For The Lover That I Lost" --description "Ballad" \
///     --artist "Sam Smith" --duration "03:56" --category pop \
///     --pitch "Melody Pitch" --melody-duration "03:56" --melody-type color
/// ```
pub async fn create_song(state: &AppState, args: CreateSongArgs, json: bool) -> Result<()> {
    let song = match &args.file {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<Song>(&content)
                .with_context(|| format!("invalid song JSON in {}", path.display()))?
        }
        None => song_from_args(args)?,
    };

    let violations = song.validate();
    if !violations.is_empty() {
        let details = violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("invalid song: {details}");
    }

    let song = state.song_service.create(song).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&song)?);
        return Ok(());
    }

    println!();
    println!("  {} Song created successfully!", style("✓").green().bold());
    println!();
    print_details(&song);

    Ok(())
}

/// Build a song from flags, prompting for anything left out.
fn song_from_args(args: CreateSongArgs) -> Result<Song> {
    let title = or_prompt(args.title, "Title")?;
    let description = or_prompt(args.description, "Description")?;
    let artist = or_prompt(args.artist, "Artist")?;
    let duration = or_prompt(args.duration, "Duration")?;
    let category = or_prompt(args.category, "Category")?
        .parse::<SongCategory>()
        .map_err(|e| anyhow::anyhow!(e))?;
    let pitch = or_prompt(args.pitch, "Melody pitch")?;
    let melody_duration = or_prompt(args.melody_duration, "Melody duration")?;
    let melody_type = or_prompt(args.melody_type, "Melody type")?
        .parse::<MelodyType>()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(Song::new(
        title,
        description,
        artist,
        duration,
        category,
        Melody::new(pitch, melody_duration, melody_type),
    ))
}

fn or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()?),
    }
}

/// List songs in a table, optionally filtered by category, artist or melody type.
pub async fn list_songs(
    state: &AppState,
    category: Option<String>,
    artist: Option<String>,
    melody_type: Option<String>,
    json: bool,
) -> Result<()> {
    let songs = if let Some(category) = category {
        state.song_service.list_by_category(&category).await?
    } else if let Some(artist) = artist {
        state.song_service.list_by_artist(&artist).await?
    } else if let Some(melody_type) = melody_type {
        state.song_service.list_by_melody_type(&melody_type).await?
    } else {
        state.song_service.list_all().await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&songs)?);
        return Ok(());
    }

    if songs.is_empty() {
        println!();
        println!(
            "  {} No songs found. Create one with: {}",
            style("i").blue().bold(),
            style("playlist create song").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Artist").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Duration").fg(Color::White),
        Cell::new("Melody").fg(Color::White),
    ]);

    for song in &songs {
        table.add_row(vec![
            Cell::new(id_text(song.id)).fg(Color::DarkGrey),
            Cell::new(&song.title).fg(Color::Cyan),
            Cell::new(&song.artist_name),
            Cell::new(song.category.to_string()).fg(Color::Green),
            Cell::new(&song.duration),
            Cell::new(melody_summary(&song.melody)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} song{}",
        style(songs.len()).bold(),
        if songs.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show a song by id, or the song owning the given melody.
pub async fn show_song(
    state: &AppState,
    id: Option<SongId>,
    melody: Option<MelodyId>,
    json: bool,
) -> Result<()> {
    let song = match (id, melody) {
        (_, Some(melody_id)) => state.song_service.get_by_melody_id(melody_id).await?,
        (Some(id), None) => state.song_service.get_by_id(id).await?,
        (None, None) => anyhow::bail!("a song id or --melody is required"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&song)?);
        return Ok(());
    }

    println!();
    print_details(&song);

    Ok(())
}

/// Delete a song permanently with confirmation.
pub async fn delete_song(state: &AppState, id: SongId, force: bool, json: bool) -> Result<()> {
    let song = state.song_service.get_by_id(id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete song '{}' and its melody?",
                style(&song.title).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.song_service.delete_by_id(id).await?;

    if json {
        println!("{}", serde_json::json!({"deleted": true, "id": id}));
    } else {
        println!("  {} Song '{}' deleted.", style("✓").red().bold(), song.title);
    }

    Ok(())
}

fn print_details(song: &Song) {
    println!("  {}", style(&song.title).cyan().bold());
    println!("  {}", style(&song.description).dim());
    println!();

    println!("  {}", style("── Details ──").dim());
    println!("  {}         {}", style("ID:").bold(), style(id_text(song.id)).dim());
    println!("  {}     {}", style("Artist:").bold(), &song.artist_name);
    println!("  {}   {}", style("Category:").bold(), song.category);
    println!("  {}   {}", style("Duration:").bold(), &song.duration);
    println!();

    println!("  {}", style("── Melody ──").dim());
    println!(
        "  {}         {}",
        style("ID:").bold(),
        style(song.melody.id.map(|id| id.to_string()).unwrap_or_default()).dim()
    );
    println!("  {}      {}", style("Pitch:").bold(), &song.melody.pitch);
    println!("  {}   {}", style("Duration:").bold(), &song.melody.duration);
    println!(
        "  {}       {}",
        style("Type:").bold(),
        song.melody
            .melody_type
            .map(|t| t.to_string())
            .unwrap_or_default()
    );
    println!();
}

fn id_text(id: Option<SongId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn melody_summary(melody: &Melody) -> String {
    match melody.melody_type {
        Some(kind) => format!("{} ({kind})", melody.pitch),
        None => melody.pitch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_from_args_parses_classifications() {
        let args = CreateSongArgs {
            file: None,
            title: Some("For The Lover That I Lost".into()),
            description: Some("Ballad".into()),
            artist: Some("Sam Smith".into()),
            duration: Some("03:56".into()),
            category: Some("pop".into()),
            pitch: Some("Melody Pitch".into()),
            melody_duration: Some("03:56".into()),
            melody_type: Some("Color".into()),
        };

        let song = song_from_args(args).unwrap();
        assert_eq!(song.category, SongCategory::Pop);
        assert_eq!(song.melody.melody_type, Some(MelodyType::Color));
        assert_eq!(song.id, None);
    }

    #[test]
    fn test_song_from_args_rejects_unknown_category() {
        let args = CreateSongArgs {
            file: None,
            title: Some("Title".into()),
            description: Some("Description".into()),
            artist: Some("Artist".into()),
            duration: Some("01:00".into()),
            category: Some("swing".into()),
            pitch: Some("Pitch".into()),
            melody_duration: Some("01:00".into()),
            melody_type: Some("color".into()),
        };

        let err = song_from_args(args).unwrap_err();
        assert!(err.to_string().contains("swing"));
    }

    #[test]
    fn test_melody_summary() {
        let melody = Melody::new("Melody Pitch", "03:56", MelodyType::Blends);
        assert_eq!(melody_summary(&melody), "Melody Pitch (BLENDS)");
    }
}
