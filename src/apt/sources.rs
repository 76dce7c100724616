use crate::apt::AptHandle;
use crate::classifier::SecurityMarker;
use crate::error::Result;
use crate::log;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads apt's sources configuration to decide whether a security repository is configured
pub struct SourcesScanner<'a> {
    handle: &'a AptHandle,
}

impl<'a> SourcesScanner<'a> {
    pub fn new(handle: &'a AptHandle) -> Self {
        Self { handle }
    }

    /// Returns true when any enabled source entry matches the marker
    pub fn has_security_repository(&self, marker: &SecurityMarker) -> Result<bool> {
        for path in self.source_files()? {
            let Ok(content) = fs::read_to_string(&path) else {
                log::trace(format!("skipping unreadable {}", path.display()));
                continue;
            };

            let entries = if is_deb822(&path) {
                deb822_entries(&content)
            } else {
                one_line_entries(&content)
            };

            if let Some(entry) = entries.iter().find(|entry| marker.matches(entry)) {
                log::trace(format!("security repository in {}: {entry}", path.display()));
                return Ok(true);
            }
        }

        log::trace("no security repository configured");
        Ok(false)
    }

    fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        if self.handle.sources_list().is_file() {
            files.push(self.handle.sources_list().to_path_buf());
        }

        let parts = self.handle.sources_parts();
        if parts.is_dir() {
            let mut extra: Vec<PathBuf> = fs::read_dir(parts)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| {
                    path.is_file()
                        && matches!(
                            path.extension().and_then(|e| e.to_str()),
                            Some("list") | Some("sources")
                        )
                })
                .collect();
            extra.sort();
            files.extend(extra);
        }

        Ok(files)
    }
}

fn is_deb822(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("sources")
}

/// `deb uri suite [components...]` lines with `[options]` dropped, comments and deb-src removed
fn one_line_entries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter_map(|line| line.strip_prefix("deb"))
        .filter(|rest| rest.starts_with([' ', '\t']))
        .map(|rest| {
            let rest = rest.trim_start();
            let rest = match rest.strip_prefix('[') {
                Some(options) => options.split_once(']').map_or("", |(_, tail)| tail),
                None => rest,
            };
            format!("deb {}", rest.trim())
        })
        .collect()
}

/// One entry per deb822 stanza: its `URIs` and `Suites` joined, skipping disabled stanzas.
/// Stanzas end at any blank or whitespace-only line.
fn deb822_entries(content: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut stanza = Stanza::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            stanza.finish(&mut entries);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_ascii_lowercase().as_str() {
            "types" => stanza.binary = value.split_whitespace().any(|t| t == "deb"),
            "enabled" => stanza.enabled = parse_apt_bool(value).unwrap_or(true),
            "uris" | "suites" => stanza.fields.push(value.to_string()),
            _ => {}
        }
    }
    stanza.finish(&mut entries);

    entries
}

#[derive(Debug)]
struct Stanza {
    fields: Vec<String>,
    enabled: bool,
    binary: bool,
}

impl Default for Stanza {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            enabled: true,
            binary: false,
        }
    }
}

impl Stanza {
    fn finish(&mut self, entries: &mut Vec<String>) {
        let stanza = std::mem::take(self);
        if stanza.enabled && stanza.binary && !stanza.fields.is_empty() {
            entries.push(stanza.fields.join(" "));
        }
    }
}

/// Boolean words as apt's configuration parser accepts them
fn parse_apt_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" | "with" | "on" | "enable" | "1" => Some(true),
        "no" | "false" | "without" | "off" | "disable" | "0" => Some(false),
        _ => None,
    }
}
