//! Visualization tool inputs: data-source provisioning (YAML) and dashboard
//! descriptions (JSON).

use serde::Deserialize;

use super::null_as_default;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasourceProvisioning {
    #[serde(default, rename = "apiVersion")]
    pub api_version: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datasources: Vec<Datasource>,
}

impl DatasourceProvisioning {
    /// First data source of the given type.
    pub fn by_type(&self, kind: &str) -> Option<&Datasource> {
        self.datasources.iter().find(|d| d.kind.as_deref() == Some(kind))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Datasource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "isDefault")]
    pub is_default: bool,
}

/// Dashboard description. Accepts both the bare model and the
/// `{"dashboard": {...}}` wrapper produced by the HTTP API export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "DashboardDoc")]
pub struct Dashboard {
    pub title: Option<String>,
    pub panels: Vec<Panel>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DashboardDoc {
    Wrapped { dashboard: DashboardModel },
    Bare(DashboardModel),
}

#[derive(Deserialize)]
struct DashboardModel {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    panels: Vec<Panel>,
}

impl From<DashboardDoc> for Dashboard {
    fn from(doc: DashboardDoc) -> Self {
        let m = match doc {
            DashboardDoc::Wrapped { dashboard } => dashboard,
            DashboardDoc::Bare(m) => m,
        };
        Self { title: m.title, panels: m.panels }
    }
}

impl Dashboard {
    /// Leaf panels: row panels are replaced by the panels they contain.
    pub fn leaf_panels(&self) -> Vec<&Panel> {
        let mut out = Vec::new();
        for p in &self.panels {
            p.collect_leaves(&mut out);
        }
        out
    }

    /// Every query target across all leaf panels.
    pub fn targets(&self) -> Vec<&Target> {
        self.leaf_panels().into_iter().flat_map(|p| &p.targets).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Panel {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, rename = "gridPos")]
    pub grid_pos: Option<GridPos>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Vec<Target>,
    /// Children of a collapsed row.
    #[serde(default, deserialize_with = "null_as_default")]
    pub panels: Vec<Panel>,
}

impl Panel {
    pub fn is_row(&self) -> bool {
        self.kind.as_deref() == Some("row")
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Panel>) {
        if self.is_row() {
            for child in &self.panels {
                child.collect_leaves(out);
            }
        } else {
            out.push(self);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GridPos {
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    #[serde(default)]
    pub w: u32,
    #[serde(default)]
    pub h: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub expr: Option<String>,
    #[serde(default, rename = "legendFormat")]
    pub legend_format: Option<String>,
}
