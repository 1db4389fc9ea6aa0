use crate::core::{ExplorerError, Result};
use std::process::Command;
use tracing::{info, warn};

/// Where a chosen stream is handed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTarget {
    /// Open the landing page in the system browser.
    Browser,
    /// Extract the manifest and play it with the configured player.
    App,
}

pub fn open_in_browser(url: &str) -> Result<()> {
    info!("Opening {} in browser", url);
    webbrowser::open(url).map_err(ExplorerError::Browser)
}

/// Splits a player command template into program and arguments. Placeholder
/// arguments (`{URL}`, `{url}`, `URL`) are replaced; otherwise the stream URL
/// is appended.
pub fn build_player_command(template: &str, stream_url: &str) -> Result<(String, Vec<String>)> {
    let mut parts: Vec<String> = template.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        return Err(ExplorerError::EmptyPlayerCommand);
    }

    let mut replaced = false;
    for part in parts.iter_mut() {
        if part == "{URL}" || part == "{url}" || part == "URL" {
            *part = stream_url.to_string();
            replaced = true;
        }
    }
    if !replaced {
        parts.push(stream_url.to_string());
    }

    let program = parts.remove(0);
    Ok((program, parts))
}

/// Spawns the player on the manifest and returns its pid. The player is not
/// waited on.
pub fn launch_player(template: &str, manifest_url: &str) -> Result<u32> {
    let (program, args) = build_player_command(template, manifest_url)?;
    info!("Launching player: {} {:?}", program, args);

    match Command::new(&program).args(&args).spawn() {
        Ok(child) => {
            info!("Spawned player pid={}", child.id());
            Ok(child.id())
        }
        Err(source) => {
            warn!("Failed to spawn {}: {}", program, source);
            Err(ExplorerError::PlayerSpawn { program, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_replaced() {
        let (program, args) =
            build_player_command("mpv --no-ytdl {URL} --fs", "https://c/master.m3u8").unwrap();
        assert_eq!(program, "mpv");
        assert_eq!(args, vec!["--no-ytdl", "https://c/master.m3u8", "--fs"]);
    }

    #[test]
    fn test_url_appended_without_placeholder() {
        let (program, args) = build_player_command("vlc --fullscreen", "https://c/m.m3u8").unwrap();
        assert_eq!(program, "vlc");
        assert_eq!(args, vec!["--fullscreen", "https://c/m.m3u8"]);
    }

    #[test]
    fn test_empty_command() {
        assert!(matches!(
            build_player_command("   ", "https://c/m.m3u8"),
            Err(ExplorerError::EmptyPlayerCommand)
        ));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = launch_player("definitely-not-a-player-binary-4711", "https://c/m.m3u8").unwrap_err();
        assert!(matches!(err, ExplorerError::PlayerSpawn { .. }));
    }
}
