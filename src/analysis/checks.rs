use clap::ValueEnum;
use serde::Deserialize;

/// A single diagnostic pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Check {
    /// Triangles repeating the same vertex indices
    IndexDuplicates,
    /// Triangles repeating the same vertex positions
    GeometryDuplicates,
    /// Edges bordering a single triangle
    OpenEdges,
    /// Edges shared by more than two triangles
    NonManifoldEdges,
}

impl Check {
    pub const ALL: [Check; 4] = [
        Check::IndexDuplicates,
        Check::GeometryDuplicates,
        Check::OpenEdges,
        Check::NonManifoldEdges,
    ];
}

fn enabled() -> bool {
    true
}

/// Which passes to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Checks {
    #[serde(default = "enabled")]
    pub index_duplicates: bool,
    #[serde(default = "enabled")]
    pub geometry_duplicates: bool,
    #[serde(default = "enabled")]
    pub open_edges: bool,
    #[serde(default = "enabled")]
    pub non_manifold_edges: bool,
}

impl Default for Checks {
    fn default() -> Self {
        Self {
            index_duplicates: true,
            geometry_duplicates: true,
            open_edges: true,
            non_manifold_edges: true,
        }
    }
}

impl Checks {
    pub fn is_enabled(&self, check: Check) -> bool {
        match check {
            Check::IndexDuplicates => self.index_duplicates,
            Check::GeometryDuplicates => self.geometry_duplicates,
            Check::OpenEdges => self.open_edges,
            Check::NonManifoldEdges => self.non_manifold_edges,
        }
    }

    /// Disable the given passes
    pub fn without(mut self, skipped: &[Check]) -> Self {
        for check in skipped {
            match check {
                Check::IndexDuplicates => self.index_duplicates = false,
                Check::GeometryDuplicates => self.geometry_duplicates = false,
                Check::OpenEdges => self.open_edges = false,
                Check::NonManifoldEdges => self.non_manifold_edges = false,
            }
        }
        self
    }

    /// Edge adjacency is needed by either edge check
    pub fn needs_edges(&self) -> bool {
        self.open_edges || self.non_manifold_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_all() {
        let checks = Checks::default();
        assert!(Check::ALL.iter().all(|&c| checks.is_enabled(c)));
    }

    #[test]
    fn test_without() {
        let checks = Checks::default().without(&[Check::OpenEdges, Check::GeometryDuplicates]);

        assert!(checks.is_enabled(Check::IndexDuplicates));
        assert!(!checks.is_enabled(Check::GeometryDuplicates));
        assert!(!checks.is_enabled(Check::OpenEdges));
        assert!(checks.is_enabled(Check::NonManifoldEdges));
        assert!(checks.needs_edges());

        let checks = checks.without(&[Check::NonManifoldEdges]);
        assert!(!checks.needs_edges());
    }

    #[test]
    fn test_value_enum_names() {
        let check = Check::from_str("non-manifold-edges", false).unwrap();
        assert_eq!(check, Check::NonManifoldEdges);
        assert!(Check::from_str("edges", false).is_err());
    }
}
