use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// A mentionable entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub display_name: String,
    pub contact_address: String,
    #[serde(default)]
    pub avatar: String,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        contact_address: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            contact_address: contact_address.into(),
            avatar: avatar.into(),
        }
    }
}

/// Read-only provider of mention candidates.
pub trait CandidateDirectory {
    /// Returns the candidates matching `query`, best first.
    fn search(&self, query: &str) -> Vec<Candidate>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// 0.0 keeps only matches as strong as the query against itself; 1.0
    /// keeps every alignment the matcher finds.
    pub threshold: f32,
    pub limit: Option<usize>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            limit: None,
        }
    }
}

/// Fuzzy-ranks a fixed candidate list on display name and contact address.
#[derive(Debug, Clone, Default)]
pub struct FuzzyDirectory {
    candidates: Vec<Candidate>,
    options: MatchOptions,
}

impl FuzzyDirectory {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            options: MatchOptions::default(),
        }
    }

    pub fn options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Scores every candidate, returning `(relative score, candidate)` pairs
    /// that pass the threshold, best first. Ties keep directory order.
    pub fn rank(&self, query: &str) -> Vec<(f32, &Candidate)> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut buf = Vec::new();
        let perfect = pattern
            .score(Utf32Str::new(query, &mut buf), &mut matcher)
            .filter(|score| *score > 0)
            .unwrap_or(1) as f32;
        let cutoff = 1.0 - self.options.threshold.clamp(0.0, 1.0);

        let mut ranked: Vec<(f32, &Candidate)> = self
            .candidates
            .iter()
            .filter_map(|candidate| {
                let best = [&candidate.display_name, &candidate.contact_address]
                    .into_iter()
                    .filter_map(|field| {
                        pattern.score(Utf32Str::new(field, &mut buf), &mut matcher)
                    })
                    .max()?;
                let relative = (best as f32 / perfect).min(1.0);
                (relative >= cutoff).then_some((relative, candidate))
            })
            .collect();

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        if let Some(limit) = self.options.limit {
            ranked.truncate(limit);
        }
        ranked
    }
}

impl CandidateDirectory for FuzzyDirectory {
    fn search(&self, query: &str) -> Vec<Candidate> {
        let results: Vec<Candidate> = self
            .rank(query)
            .into_iter()
            .map(|(_, candidate)| candidate.clone())
            .collect();
        tracing::debug!(query, matches = results.len(), "ranked mention candidates");
        results
    }
}

/// The sample people shown by the demo editor.
pub fn demo_directory() -> FuzzyDirectory {
    FuzzyDirectory::new(vec![
        Candidate::new(
            "1",
            "John Doe",
            "john@example.com",
            "https://ui-avatars.com/api/?name=John+Doe",
        ),
        Candidate::new(
            "2",
            "Jane Smith",
            "jane@example.com",
            "https://ui-avatars.com/api/?name=Jane+Smith",
        ),
        Candidate::new(
            "3",
            "Bob Johnson",
            "bob@example.com",
            "https://ui-avatars.com/api/?name=Bob+Johnson",
        ),
    ])
}
