//! Collected findings and their text rendering

use super::checks::Checks;
use super::duplicates::DuplicatePair;
use super::edges::{Edge, EdgeMap};
use crate::mesh::Mesh;
use std::io::{self, Write};

/// Findings of every pass that ran over a mesh
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// `None` when the pass was skipped
    pub index_duplicates: Option<Vec<DuplicatePair>>,
    pub geometry_duplicates: Option<Vec<DuplicatePair>>,
    pub edges: Option<EdgeMap>,
    pub checks: Checks,
}

impl Diagnostics {
    pub fn new(checks: Checks) -> Self {
        Self {
            checks,
            ..Default::default()
        }
    }

    pub fn open_edges(&self) -> Vec<&Edge> {
        match &self.edges {
            Some(edges) if self.checks.open_edges => edges.open_edges().collect(),
            _ => Vec::new(),
        }
    }

    pub fn non_manifold_edges(&self) -> Vec<&Edge> {
        match &self.edges {
            Some(edges) if self.checks.non_manifold_edges => edges.non_manifold_edges().collect(),
            _ => Vec::new(),
        }
    }

    /// Total number of reported anomalies across enabled passes
    pub fn issue_count(&self) -> usize {
        self.index_duplicates.as_ref().map_or(0, Vec::len)
            + self.geometry_duplicates.as_ref().map_or(0, Vec::len)
            + self.open_edges().len()
            + self.non_manifold_edges().len()
    }

    pub fn has_issues(&self) -> bool {
        self.issue_count() > 0
    }

    /// One-line summary of the enabled passes
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(dups) = &self.index_duplicates {
            parts.push(format!("{} duplicated by index", dups.len()));
        }
        if let Some(dups) = &self.geometry_duplicates {
            parts.push(format!("{} duplicated by verts", dups.len()));
        }
        if self.edges.is_some() {
            if self.checks.open_edges {
                parts.push(format!("{} open edges", self.open_edges().len()));
            }
            if self.checks.non_manifold_edges {
                parts.push(format!(
                    "{} non-manifold edges",
                    self.non_manifold_edges().len()
                ));
            }
        }

        if parts.is_empty() {
            "No checks run".to_string()
        } else {
            format!("Summary: {}", parts.join(", "))
        }
    }

    /// Write the bannered report for every pass that ran
    pub fn write_report<W: Write>(&self, mesh: &Mesh, out: &mut W) -> io::Result<()> {
        if let Some(dups) = &self.index_duplicates {
            banner(out, "Looking for duplicated TRIs by index")?;
            for dup in dups {
                let first = &mesh.triangles[dup.first];
                let duplicate = &mesh.triangles[dup.duplicate];
                writeln!(out, "Duplicated TRI detected: ")?;
                writeln!(out, "First: {}", mesh.describe(first))?;
                writeln!(out, "Duplicate: {}", mesh.describe(duplicate))?;
                writeln!(out)?;
            }
        }

        if let Some(dups) = &self.geometry_duplicates {
            banner(out, "Looking for duplicated TRIs by verts")?;
            for dup in dups {
                let first = mesh.build(&mesh.triangles[dup.first]);
                let duplicate = mesh.build(&mesh.triangles[dup.duplicate]);
                writeln!(out, "Duplicated TRI detected: ")?;
                writeln!(out, "First: {}", first)?;
                writeln!(out, "Duplicate: {}", duplicate)?;
                writeln!(out)?;
            }
        }

        if self.edges.is_some() {
            if self.checks.open_edges {
                banner(out, "Checking for open edges")?;
                for edge in self.open_edges() {
                    writeln!(out, "Open {}", describe_edge(mesh, edge))?;
                }
            }
            if self.checks.non_manifold_edges {
                banner(out, "Checking non-manifold edges")?;
                for edge in self.non_manifold_edges() {
                    writeln!(out, "Non-manifold {}", describe_edge(mesh, edge))?;
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "{}", self.summary())
    }
}

fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "------------------------------------")
}

/// Edge endpoints with positions, followed by the referencing triangles
fn describe_edge(mesh: &Mesh, edge: &Edge) -> String {
    let (a, b) = edge.first_seen;
    let tris: Vec<String> = edge
        .triangles
        .iter()
        .map(|&t| mesh.triangles[t].to_string())
        .collect();
    format!(
        "Edge: ({}, {}) [({}, {})]\n Tris: [{}]",
        a,
        b,
        mesh.vertices[a],
        mesh.vertices[b],
        tris.join(", ")
    )
}
