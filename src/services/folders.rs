// src/services/folders.rs
// Marketing Hub folder walk with a canonical fallback layout

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::drive::DriveProvider;

/// Hardcoded Marketing Hub layout used when Drive cannot be read.
/// Top-level folders with their children and, where present, grandchildren.
const FALLBACK_LAYOUT: &[(&str, &[(&str, &[&str])])] = &[
    (
        "01_Brand Assets",
        &[
            ("Logos & Visual Identity", &[]),
            ("Company Profiles", &[]),
            ("Photography & Videos", &[]),
        ],
    ),
    (
        "02_Product Lines & Sub-Brands",
        &[("Spectra", &[]), ("Bharat Series", &[]), ("Software Platform", &[])],
    ),
    (
        "03_Marketing Campaigns",
        &[
            ("Campaign Assets", &[]),
            ("Product Brochures", &[]),
            ("Social Media Content", &[]),
        ],
    ),
    (
        "04_Sales Enablement",
        &[
            ("Presentations", &[]),
            (
                "Industry Specific Material",
                &[
                    "Mining",
                    "Agriculture",
                    "Solar & Renewable Energy",
                    "Infrastructure",
                    "Security",
                ],
            ),
            ("Brochures & Datasheets", &[]),
        ],
    ),
    (
        "05_Technical Documentation",
        &[("Product Specifications", &[]), ("User Manuals", &[])],
    ),
    (
        "06_Compliance",
        &[("Certifications", &[]), ("Legal Documents", &[])],
    ),
    ("General", &[("Uploads", &[])]),
];

/// One folder discovered under the Marketing Hub root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    /// 0 for folders directly under the root.
    pub depth: u32,
    pub parent_id: String,
    /// Names from the first level down to this folder, root label excluded.
    pub path: Vec<String>,
}

impl FolderNode {
    pub fn display_path(&self) -> String {
        format!("Marketing Hub → {}", self.path.join(" → "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeSource {
    Live,
    Fallback,
}

/// Folder hierarchy handed to the recommendation prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    pub nodes: Vec<FolderNode>,
    pub source: TreeSource,
}

impl FolderTree {
    pub fn is_fallback(&self) -> bool {
        self.source == TreeSource::Fallback
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_by_display_path(&self, path: &str) -> Option<&FolderNode> {
        self.nodes.iter().find(|node| node.display_path() == path)
    }

    /// Render the hierarchy as the prompt block: folders sorted by
    /// (depth, name) under per-level banners, then the usage guidelines.
    pub fn serialize_for_prompt(&self) -> String {
        let label = match self.source {
            TreeSource::Live => "Real-time data",
            TreeSource::Fallback => "Fallback",
        };
        let mut text = format!("MARKETING HUB FOLDER STRUCTURE ({label}):\n\n");

        let mut sorted: Vec<&FolderNode> = self.nodes.iter().collect();
        sorted.sort_by(|a, b| (a.depth, &a.name).cmp(&(b.depth, &b.name)));

        let mut current_depth = None;
        for node in sorted {
            if current_depth != Some(node.depth) {
                current_depth = Some(node.depth);
                text.push_str(&format!("\n--- LEVEL {} FOLDERS ---\n", node.depth + 1));
            }
            let indent = "  ".repeat(node.depth as usize);
            text.push_str(&format!("{indent}📁 {}\n", node.display_path()));
        }

        text.push_str("\n--- FOLDER USAGE GUIDELINES ---\n");
        text.push_str("• Brand Assets: Logos, company profiles, visual identity\n");
        text.push_str(
            "• Product Lines: Spectra (mining/infrastructure), Bharat (agriculture), Software Platform (DMO)\n",
        );
        text.push_str("• Sales Enablement: Presentations, brochures, industry-specific materials\n");
        text.push_str("• Marketing Campaigns: Campaign assets, product brochures, social content\n");
        text.push_str("• Technical Documentation: Manuals, specifications, technical guides\n");
        text.push_str("• Compliance: Certifications, legal documents\n");

        text
    }
}

/// The canonical Marketing Hub layout with synthetic node ids.
pub fn fallback_tree() -> FolderTree {
    let mut nodes: Vec<FolderNode> = Vec::new();
    let mut counter = 0usize;

    for (top_name, children) in FALLBACK_LAYOUT {
        counter += 1;
        let top_id = format!("fallback-{counter}");
        nodes.push(FolderNode {
            id: top_id.clone(),
            name: top_name.to_string(),
            depth: 0,
            parent_id: "fallback-root".to_string(),
            path: vec![top_name.to_string()],
        });

        for (child_name, grandchildren) in *children {
            counter += 1;
            let child_id = format!("fallback-{counter}");
            let child_path = vec![top_name.to_string(), child_name.to_string()];
            nodes.push(FolderNode {
                id: child_id.clone(),
                name: child_name.to_string(),
                depth: 1,
                parent_id: top_id.clone(),
                path: child_path.clone(),
            });

            for grandchild_name in *grandchildren {
                counter += 1;
                let mut path = child_path.clone();
                path.push(grandchild_name.to_string());
                nodes.push(FolderNode {
                    id: format!("fallback-{counter}"),
                    name: grandchild_name.to_string(),
                    depth: 2,
                    parent_id: child_id.clone(),
                    path,
                });
            }
        }
    }

    FolderTree {
        nodes,
        source: TreeSource::Fallback,
    }
}

/// Reads the live folder hierarchy under the Marketing Hub root.
///
/// Any failure degrades to the fallback layout; this stage never errors.
pub struct FolderService {
    drive: Arc<dyn DriveProvider>,
    max_depth: u32,
}

impl FolderService {
    pub fn new(drive: Arc<dyn DriveProvider>, max_depth: u32) -> Self {
        Self { drive, max_depth }
    }

    pub async fn get_tree(&self, root_id: &str) -> FolderTree {
        if !self.drive.is_available() {
            warn!("⚠️ Drive not available, using fallback folder structure");
            return fallback_tree();
        }

        match self.drive.file_metadata(root_id, "id,name").await {
            Ok(root) => info!("✅ Accessed Marketing Hub folder: {}", root.name),
            Err(e) => {
                warn!("⚠️ Cannot access Marketing Hub folder {}: {}, using fallback", root_id, e);
                return fallback_tree();
            }
        }

        let nodes = self.walk(root_id).await;
        if nodes.is_empty() {
            warn!("⚠️ No folders found in Marketing Hub, using fallback");
            return fallback_tree();
        }

        info!("✅ Folder structure read ({} folders)", nodes.len());
        FolderTree {
            nodes,
            source: TreeSource::Live,
        }
    }

    /// Level-order walk. Sibling listings for one level run concurrently;
    /// results are appended in parent order, so output is deterministic.
    /// A failed listing skips that parent's subtree only.
    async fn walk(&self, root_id: &str) -> Vec<FolderNode> {
        let mut nodes = Vec::new();
        let mut frontier: Vec<(String, Vec<String>)> = vec![(root_id.to_string(), Vec::new())];

        for depth in 0..self.max_depth {
            let listings = join_all(
                frontier
                    .iter()
                    .map(|(parent_id, _)| self.drive.list_child_folders(parent_id)),
            )
            .await;

            let mut next = Vec::new();
            for ((parent_id, parent_path), listing) in frontier.iter().zip(listings) {
                let children = match listing {
                    Ok(children) => children,
                    Err(e) => {
                        warn!("⚠️ Error reading folders at depth {}: {}", depth, e);
                        continue;
                    }
                };

                for child in children {
                    let mut path = parent_path.clone();
                    path.push(child.name.clone());
                    next.push((child.id.clone(), path.clone()));
                    nodes.push(FolderNode {
                        id: child.id,
                        name: child.name,
                        depth,
                        parent_id: parent_id.clone(),
                        path,
                    });
                }
            }

            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        nodes
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;

    use super::*;
    use crate::drive::DriveFile;
    use crate::error::{ProviderError, ProviderResult};

    struct MapDrive {
        children: HashMap<String, Vec<DriveFile>>,
        failing_parents: HashSet<String>,
        root_reachable: bool,
    }

    impl MapDrive {
        fn new(layout: &[(&str, &[(&str, &str)])]) -> Self {
            let mut children = HashMap::new();
            for (parent, kids) in layout {
                let files = kids
                    .iter()
                    .map(|(id, name)| DriveFile {
                        id: id.to_string(),
                        name: name.to_string(),
                        ..Default::default()
                    })
                    .collect();
                children.insert(parent.to_string(), files);
            }
            Self {
                children,
                failing_parents: HashSet::new(),
                root_reachable: true,
            }
        }
    }

    #[async_trait]
    impl DriveProvider for MapDrive {
        fn is_available(&self) -> bool {
            true
        }

        async fn file_metadata(&self, file_id: &str, _: &str) -> ProviderResult<DriveFile> {
            if self.root_reachable {
                Ok(DriveFile {
                    id: file_id.to_string(),
                    name: "Marketing Hub".to_string(),
                    ..Default::default()
                })
            } else {
                Err(ProviderError::Status { status: 404 })
            }
        }

        async fn list_child_folders(&self, parent_id: &str) -> ProviderResult<Vec<DriveFile>> {
            if self.failing_parents.contains(parent_id) {
                return Err(ProviderError::Status { status: 500 });
            }
            Ok(self.children.get(parent_id).cloned().unwrap_or_default())
        }

        async fn export_text(&self, _: &str) -> ProviderResult<String> {
            Err(ProviderError::NotConfigured)
        }

        async fn find_by_name(&self, _: &str, _: Option<&str>) -> ProviderResult<Vec<DriveFile>> {
            Err(ProviderError::NotConfigured)
        }

        async fn create_file(
            &self,
            _: &str,
            _: &str,
            _: &str,
            _: Vec<u8>,
        ) -> ProviderResult<DriveFile> {
            Err(ProviderError::NotConfigured)
        }

        fn name(&self) -> &'static str {
            "map"
        }
    }

    #[test]
    fn test_fallback_tree_shape() {
        let tree = fallback_tree();

        assert_eq!(tree.len(), 29);
        assert!(tree.is_fallback());
        assert_eq!(tree.nodes.iter().filter(|n| n.depth == 0).count(), 7);
        assert!(
            tree.find_by_display_path(
                "Marketing Hub → 04_Sales Enablement → Industry Specific Material → Mining"
            )
            .is_some()
        );
        assert!(
            tree.find_by_display_path("Marketing Hub → General → Uploads")
                .is_some()
        );
    }

    #[test]
    fn test_fallback_tree_parent_links() {
        let tree = fallback_tree();
        let by_id: HashMap<&str, &FolderNode> =
            tree.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        for node in &tree.nodes {
            if node.depth == 0 {
                assert_eq!(node.parent_id, "fallback-root");
            } else {
                let parent = by_id[node.parent_id.as_str()];
                assert_eq!(parent.depth, node.depth - 1);
                assert_eq!(&node.path[..node.path.len() - 1], &parent.path[..]);
            }
        }
    }

    #[test]
    fn test_serialize_groups_and_indents() {
        let text = fallback_tree().serialize_for_prompt();

        assert!(text.starts_with("MARKETING HUB FOLDER STRUCTURE (Fallback):\n\n"));
        assert!(text.contains("--- LEVEL 1 FOLDERS ---"));
        assert!(text.contains("--- LEVEL 3 FOLDERS ---"));
        assert!(text.contains("📁 Marketing Hub → General → Uploads"));
        assert!(text.contains(
            "    📁 Marketing Hub → 04_Sales Enablement → Industry Specific Material → Mining"
        ));
        assert!(text.contains("--- FOLDER USAGE GUIDELINES ---"));
        assert!(text.contains("• Compliance: Certifications, legal documents"));

        let level1 = text.find("--- LEVEL 1 FOLDERS ---").unwrap();
        let level2 = text.find("--- LEVEL 2 FOLDERS ---").unwrap();
        let level3 = text.find("--- LEVEL 3 FOLDERS ---").unwrap();
        assert!(level1 < level2 && level2 < level3);
    }

    #[test]
    fn test_serialize_sorts_siblings_by_name() {
        let tree = FolderTree {
            nodes: vec![
                FolderNode {
                    id: "b".into(),
                    name: "Zulu".into(),
                    depth: 0,
                    parent_id: "root".into(),
                    path: vec!["Zulu".into()],
                },
                FolderNode {
                    id: "a".into(),
                    name: "Alpha".into(),
                    depth: 0,
                    parent_id: "root".into(),
                    path: vec!["Alpha".into()],
                },
            ],
            source: TreeSource::Live,
        };

        let text = tree.serialize_for_prompt();
        assert!(text.starts_with("MARKETING HUB FOLDER STRUCTURE (Real-time data):"));
        let alpha = text.find("Marketing Hub → Alpha").unwrap();
        let zulu = text.find("Marketing Hub → Zulu").unwrap();
        assert!(alpha < zulu);
    }

    #[tokio::test]
    async fn test_get_tree_walks_levels_in_order() {
        let drive = MapDrive::new(&[
            ("root", &[("a", "Assets"), ("b", "Brochures")]),
            ("a", &[("a1", "Logos")]),
        ]);
        let service = FolderService::new(Arc::new(drive), 3);

        let tree = service.get_tree("root").await;
        assert!(!tree.is_fallback());

        let names: Vec<&str> = tree.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Assets", "Brochures", "Logos"]);

        let logos = &tree.nodes[2];
        assert_eq!(logos.depth, 1);
        assert_eq!(logos.parent_id, "a");
        assert_eq!(logos.display_path(), "Marketing Hub → Assets → Logos");
    }

    #[tokio::test]
    async fn test_get_tree_respects_depth_bound() {
        let drive = MapDrive::new(&[
            ("root", &[("a", "Level1")]),
            ("a", &[("b", "Level2")]),
            ("b", &[("c", "Level3")]),
        ]);
        let service = FolderService::new(Arc::new(drive), 2);

        let tree = service.get_tree("root").await;
        let names: Vec<&str> = tree.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Level1", "Level2"]);
    }

    #[tokio::test]
    async fn test_get_tree_skips_failed_parent_subtree() {
        let mut drive = MapDrive::new(&[
            ("root", &[("a", "Broken"), ("b", "Healthy")]),
            ("a", &[("a1", "Hidden")]),
            ("b", &[("b1", "Visible")]),
        ]);
        drive.failing_parents.insert("a".to_string());
        let service = FolderService::new(Arc::new(drive), 3);

        let tree = service.get_tree("root").await;
        assert!(!tree.is_fallback());

        let names: Vec<&str> = tree.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Broken", "Healthy", "Visible"]);
    }

    #[tokio::test]
    async fn test_get_tree_unreachable_root_falls_back() {
        let mut drive = MapDrive::new(&[("root", &[("a", "Assets")])]);
        drive.root_reachable = false;
        let service = FolderService::new(Arc::new(drive), 3);

        let tree = service.get_tree("root").await;
        assert!(tree.is_fallback());
        assert!(!tree.is_empty());
        assert!(
            tree.nodes
                .iter()
                .all(|n| n.display_path().starts_with("Marketing Hub"))
        );
    }

    #[tokio::test]
    async fn test_get_tree_empty_hub_falls_back() {
        let drive = MapDrive::new(&[("root", &[])]);
        let service = FolderService::new(Arc::new(drive), 3);

        let tree = service.get_tree("root").await;
        assert!(tree.is_fallback());
    }
}
