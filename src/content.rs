//! The catalogue of clips shown in the gallery.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Values starting with `[` are unfilled template slots, e.g. `[Producer Name]`.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.starts_with('[')
}

/// Crew credits in the order the roles were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Crew(pub Vec<(String, String)>);

impl Crew {
    pub fn from_pairs<R, N>(pairs: impl IntoIterator<Item = (R, N)>) -> Self
    where
        R: Into<String>,
        N: Into<String>,
    {
        Crew(
            pairs
                .into_iter()
                .map(|(role, name)| (role.into(), name.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Crew {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CrewVisitor;

        impl<'de> Visitor<'de> for CrewVisitor {
            type Value = Crew;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of crew roles to names")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Crew, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((role, name)) = map.next_entry::<String, Option<String>>()? {
                    entries.push((role, name.unwrap_or_default()));
                }
                Ok(Crew(entries))
            }
        }

        deserializer.deserialize_map(CrewVisitor)
    }
}

/// One clip and its credits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoRecord {
    pub src: PathBuf,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub crew: Option<Crew>,
    #[serde(default)]
    pub description: Option<Vec<String>>,
}

impl VideoRecord {
    pub fn new(
        src: impl Into<PathBuf>,
        title: impl Into<String>,
        director: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            director: director.into(),
            crew: None,
            description: None,
        }
    }

    pub fn with_crew(mut self, crew: Crew) -> Self {
        self.crew = Some(crew);
        self
    }

    pub fn with_description<S>(mut self, paragraphs: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        self.description = Some(paragraphs.into_iter().map(Into::into).collect());
        self
    }

    /// Record for a clip dropped onto the window or picked from the file dialog.
    pub fn from_file(path: PathBuf) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(path, title, "Unknown Director")
    }

    /// Description paragraphs that are actually filled in.
    pub fn visible_paragraphs(&self) -> Vec<String> {
        self.description
            .iter()
            .flatten()
            .filter(|p| !is_placeholder(p))
            .cloned()
            .collect()
    }

    /// `(Role, Name)` pairs with the role capitalized and unset names dropped.
    pub fn visible_crew(&self) -> Vec<(String, String)> {
        self.crew
            .iter()
            .flat_map(|crew| crew.0.iter())
            .filter(|(_, name)| !is_placeholder(name))
            .map(|(role, name)| (capitalize(role), name.clone()))
            .collect()
    }
}

fn capitalize(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered, owned list of records. Only `push` and `replace` mutate it.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    records: Vec<VideoRecord>,
}

impl ContentStore {
    pub fn new(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&VideoRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record and returns its index.
    pub fn push(&mut self, record: VideoRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn replace(&mut self, records: Vec<VideoRecord>) {
        self.records = records;
    }
}

/// Reads a JSON array of records; relative `src` paths resolve against the manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Vec<VideoRecord>> {
    let content = std::fs::read_to_string(path)?;
    let mut records: Vec<VideoRecord> = serde_json::from_str(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for record in &mut records {
        if record.src.is_relative() {
            record.src = base.join(&record.src);
        }
    }
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn template_crew(director: &str) -> Crew {
    Crew::from_pairs([
        ("director", director),
        ("producer", "[Producer Name]"),
        ("cinematographer", "[Cinematographer Name]"),
        ("editor", "[Editor Name]"),
        ("other", "[Other Crew Members]"),
    ])
}

fn template_description() -> [&'static str; 3] {
    [
        "[First paragraph describing the project, its vision, and key elements.]",
        "[Second paragraph with additional details about production, themes, or notable aspects.]",
        "[Optional third paragraph if needed.]",
    ]
}

/// The catalogue shipped with the application, relative to the working directory.
pub fn builtin_catalogue() -> Vec<VideoRecord> {
    let mut records = vec![
        VideoRecord::new("videos/collateral.webm", "Collateral", "Nora Tunsli")
            .with_crew(Crew::from_pairs([
                ("director", "Nora Tunsli"),
                ("producer", "[Producer Name]"),
                ("cinematographer", "Robert Marsh"),
                ("editor", "Robert Marsh"),
                ("sound", "Srishti Pai"),
                ("other", "[Other Crew Members]"),
            ]))
            .with_description([
                "[Nora Tunsli came to us with the vision of a James Bond style action film combined with The Batman.]",
                "[It was shot using a virtual production LED wall and a high octane chase sequence fully rendered using Unreal Engine.]",
                "[Optional third paragraph if needed.]",
            ]),
    ];

    for (src, title, director) in [
        ("videos/dearsamwebsite.webm", "Dear Sam", "Sanaa Bat-Erdene"),
        ("videos/samsara.webm", "Samsara", "Robert Marsh"),
        ("videos/blood-robert marsh.webm", "Blood", "Robert Marsh"),
        ("videos/sansar.webm", "Sansar", "Robert Marsh"),
        ("videos/forestgirlshort.webm", "The Girl in the Forest", "Robert Marsh"),
    ] {
        records.push(
            VideoRecord::new(src, title, director)
                .with_crew(template_crew(director))
                .with_description(template_description()),
        );
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn placeholders_are_detected() {
        assert!(is_placeholder("[Producer Name]"));
        assert!(is_placeholder("  [Other]"));
        assert!(is_placeholder(""));
        assert!(!is_placeholder("Robert Marsh"));
    }

    #[test]
    fn samsara_shows_only_the_director_credit() {
        let record = VideoRecord::new("videos/samsara.webm", "Samsara", "Robert Marsh").with_crew(
            Crew::from_pairs([("director", "Robert Marsh"), ("producer", "[Producer Name]")]),
        );

        assert_eq!(
            record.visible_crew(),
            vec![("Director".to_string(), "Robert Marsh".to_string())]
        );
    }

    #[test]
    fn placeholder_paragraphs_are_dropped() {
        let record = VideoRecord::new("a.webm", "A", "B")
            .with_description(["[Fill me in]", "Shot on 16mm.", ""]);
        assert_eq!(record.visible_paragraphs(), vec!["Shot on 16mm.".to_string()]);
    }

    #[test]
    fn missing_optional_fields_render_nothing() {
        let record = VideoRecord::new("a.webm", "A", "B");
        assert!(record.visible_crew().is_empty());
        assert!(record.visible_paragraphs().is_empty());
    }

    #[test]
    fn crew_keeps_manifest_order() {
        let json = r#"{"src":"x.webm","title":"X","director":"D",
            "crew":{"sound":"Srishti Pai","editor":"Robert Marsh","director":"D","other":null}}"#;
        let record: VideoRecord = serde_json::from_str(json).expect("record should parse");
        let roles: Vec<String> = record.visible_crew().into_iter().map(|(role, _)| role).collect();
        assert_eq!(roles, vec!["Sound", "Editor", "Director"]);
    }

    #[test]
    fn manifest_paths_resolve_against_its_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("reel.json");
        std::fs::write(
            &path,
            r#"[{"src":"clips/a.webm","title":"A","director":"B"},{"src":"/abs/b.webm"}]"#,
        )
        .expect("failed to write manifest");

        let records = load_manifest(&path).expect("manifest should load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].src, temp_dir.path().join("clips/a.webm"));
        assert_eq!(records[1].src, PathBuf::from("/abs/b.webm"));
        assert_eq!(records[1].title, "");
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("reel.json");
        std::fs::write(&path, "{ not a list").expect("failed to write manifest");

        assert!(matches!(
            load_manifest(&path),
            Err(crate::error::Error::Manifest(_))
        ));
    }

    #[test]
    fn dropped_file_uses_stem_as_title() {
        let record = VideoRecord::from_file(PathBuf::from("/tmp/night drive.webm"));
        assert_eq!(record.title, "night drive");
        assert_eq!(record.director, "Unknown Director");
    }

    #[test]
    fn store_appends_and_replaces() {
        let mut store = ContentStore::new(builtin_catalogue());
        assert_eq!(store.len(), 6);
        assert_eq!(store.push(VideoRecord::new("n.webm", "N", "D")), 6);
        store.replace(vec![VideoRecord::new("m.webm", "M", "D")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).map(|r| r.title.as_str()), Some("M"));
    }
}
