use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, XbshlError};
use crate::model::{LeagueSnapshot, PlayerRecord, TeamStatRecord};

pub const PLAYERS_FILE: &str = "players_staging.xml";
pub const TEAMS_FILE: &str = "teams_stats.xml";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

#[derive(Serialize)]
struct PlayerList<'a> {
    player: &'a [PlayerRecord],
}

#[derive(Serialize)]
struct TeamList<'a> {
    team: &'a [TeamStatRecord],
}

/// Render players as a `<players>` document, one `<player>` per record.
pub fn players_to_xml(players: &[PlayerRecord]) -> Result<String> {
    to_xml("players", &PlayerList { player: players })
}

/// Render team stat lines as a `<teams>` document, one `<team>` per record.
pub fn teams_to_xml(teams: &[TeamStatRecord]) -> Result<String> {
    to_xml("teams", &TeamList { team: teams })
}

fn to_xml<T: Serialize>(root: &'static str, value: &T) -> Result<String> {
    let failed = |reason: String| XbshlError::Serialize {
        document: root,
        reason,
    };

    let mut xml = String::from(XML_DECLARATION);
    let mut serializer = quick_xml::se::Serializer::with_root(&mut xml, Some(root))
        .map_err(|e| failed(e.to_string()))?;
    serializer.indent(' ', 2);
    value
        .serialize(serializer)
        .map_err(|e| failed(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

/// Write the snapshot's documents into `dir`, replacing earlier runs.
///
/// Every document is rendered and staged as a `.tmp` sibling before any
/// target is replaced, so a failure while rendering or staging leaves the
/// previous run's files untouched.
pub fn write_snapshot(snapshot: &LeagueSnapshot, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = vec![(PLAYERS_FILE, players_to_xml(&snapshot.players)?)];
    if let Some(teams) = &snapshot.teams {
        documents.push((TEAMS_FILE, teams_to_xml(teams)?));
    }

    let staged = stage(&documents, dir)?;

    let mut written = Vec::with_capacity(staged.len());
    for (tmp, path) in staged {
        fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;
        debug!(path = %path.display(), "replaced document");
        written.push(path);
    }
    info!(files = written.len(), dir = %dir.display(), "saved snapshot");
    Ok(written)
}

/// Write each document to a temp sibling of its target. On failure the temp
/// files written so far are removed again.
fn stage(documents: &[(&str, String)], dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(documents.len());
    for (name, xml) in documents {
        let path = dir.join(name);
        let tmp = path.with_extension("xml.tmp");
        let result = if path.is_dir() {
            Err(io_error(
                &path,
                io::Error::other("target exists and is a directory"),
            ))
        } else {
            fs::write(&tmp, xml).map_err(|e| io_error(&tmp, e))
        };

        if let Err(e) = result {
            for (written, _) in &staged {
                let _ = fs::remove_file(written);
            }
            return Err(e);
        }
        debug!(path = %tmp.display(), bytes = xml.len(), "staged document");
        staged.push((tmp, path));
    }
    Ok(staged)
}

fn io_error(path: &Path, source: io::Error) -> XbshlError {
    XbshlError::Io {
        path: path.to_path_buf(),
        source,
    }
}
