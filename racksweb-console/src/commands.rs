//! Exécution des sous-commandes contre l'API RacksDB.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use racksweb_core::client::DiagramKind;
use racksweb_core::views::{self, ItemKind, ItemPicker};
use racksweb_core::{
    EquipmentCategory, EquipmentTypeDetails, InfrastructureView, RacksDbClient, Selection, ViewAction,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::render;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Datacenters with their room counts
    Datacenters,
    /// Infrastructures, narrowed by a name query
    Infrastructures {
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Rooms of a datacenter
    Rooms {
        datacenter: String,
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Racks of a datacenter room
    Room {
        datacenter: String,
        room: String,
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Equipment of an infrastructure, filtered and grouped by rack
    Infrastructure(InfrastructureArgs),
    /// Details of one equipment type used in an infrastructure
    EquipmentType { infrastructure: String, type_id: String },
    /// Download an SVG diagram
    Draw {
        #[arg(value_enum)]
        kind: DrawKind,
        name: String,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct InfrastructureArgs {
    pub name: String,
    #[arg(long = "rack")]
    pub racks: Vec<String>,
    #[arg(long = "type")]
    pub types: Vec<String>,
    #[arg(long = "category")]
    pub categories: Vec<EquipmentCategory>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Case-insensitive substring of the equipment name
    #[arg(long = "name")]
    pub name_query: Option<String>,
    #[arg(long)]
    pub descending: bool,
    /// Racks displayed collapsed
    #[arg(long = "collapse")]
    pub collapsed: Vec<String>,
}

impl InfrastructureArgs {
    /// Actions à rejouer sur le store, dans l'ordre d'une session interactive
    fn actions(&self) -> Vec<ViewAction> {
        let mut actions: Vec<ViewAction> = Vec::new();
        actions.extend(self.racks.iter().cloned().map(|r| ViewAction::Select(Selection::Rack(r))));
        actions.extend(
            self.types
                .iter()
                .cloned()
                .map(|t| ViewAction::Select(Selection::EquipmentType(t))),
        );
        actions.extend(
            self.categories
                .iter()
                .copied()
                .map(|c| ViewAction::Select(Selection::Category(c))),
        );
        actions.extend(self.tags.iter().cloned().map(|t| ViewAction::Select(Selection::Tag(t))));
        if let Some(query) = &self.name_query {
            actions.push(ViewAction::SetNameQuery(query.clone()));
        }
        if self.descending {
            actions.push(ViewAction::InvertSort);
        }
        actions.extend(self.collapsed.iter().cloned().map(ViewAction::ToggleRack));
        actions
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawKind {
    Room,
    Infrastructure,
}

impl From<DrawKind> for DiagramKind {
    fn from(kind: DrawKind) -> Self {
        match kind {
            DrawKind::Room => DiagramKind::Room,
            DrawKind::Infrastructure => DiagramKind::Infrastructure,
        }
    }
}

/// Exécute une commande et renvoie le texte à afficher
pub async fn execute(command: Commands, client: &RacksDbClient) -> Result<String> {
    match command {
        Commands::Datacenters => {
            let datacenters = client.datacenters().await.context("Failed to fetch datacenters")?;
            Ok(render::datacenters(&datacenters))
        }
        Commands::Infrastructures { query } => {
            let infrastructures = client
                .infrastructures()
                .await
                .context("Failed to fetch infrastructures")?;
            let mut picker = ItemPicker::new(
                ItemKind::Infrastructure,
                infrastructures.iter().map(|i| i.name.clone()).collect(),
            );
            picker.query = query.unwrap_or_default();
            let names = picker.matches();
            let matches: Vec<_> = infrastructures
                .iter()
                .filter(|infra| names.contains(&infra.name.as_str()))
                .collect();
            Ok(render::infrastructures(picker.placeholder(), &matches))
        }
        Commands::Rooms { datacenter, query } => {
            let dc = client
                .datacenter(&datacenter)
                .await
                .with_context(|| format!("Failed to fetch datacenter {datacenter}"))?;
            let rooms = views::datacenter_rooms(&dc, query.as_deref().unwrap_or_default());
            Ok(render::rooms(&dc.name, &rooms))
        }
        Commands::Room { datacenter, room, query } => {
            let dc = client
                .datacenter(&datacenter)
                .await
                .with_context(|| format!("Failed to fetch datacenter {datacenter}"))?;
            let selected = dc
                .rooms
                .iter()
                .find(|r| r.name == room)
                .with_context(|| format!("Room {room} not found in datacenter {datacenter}"))?;
            let infrastructures = client
                .infrastructures()
                .await
                .context("Failed to fetch infrastructures")?;
            let racks = views::room_racks(selected, &infrastructures, query.as_deref().unwrap_or_default());
            Ok(render::room_racks(&selected.name, &racks))
        }
        Commands::Infrastructure(args) => {
            let infrastructure = client
                .infrastructure(&args.name)
                .await
                .with_context(|| format!("Failed to fetch infrastructure {}", args.name))?;
            let mut view = InfrastructureView::new(Arc::new(infrastructure));
            for action in args.actions() {
                view.dispatch(action);
            }
            info!("{} of {} equipment visible", view.visible_count(), view.catalog().len());
            Ok(render::equipment_view(
                &view.infrastructure().name,
                &view.criteria().active_filters(),
                &view.groups(),
            ))
        }
        Commands::EquipmentType { infrastructure, type_id } => {
            let infra = client
                .infrastructure(&infrastructure)
                .await
                .with_context(|| format!("Failed to fetch infrastructure {infrastructure}"))?;
            let mut view = InfrastructureView::new(Arc::new(infra));
            let equipment_type = view
                .catalog()
                .records()
                .iter()
                .find(|r| r.type_id() == type_id)
                .map(|r| r.equipment_type.clone())
                .with_context(|| format!("No equipment of type {type_id} in {infrastructure}"))?;
            view.dispatch(ViewAction::OpenEquipmentType(equipment_type));
            let details = view
                .modal()
                .content()
                .map(EquipmentTypeDetails::from)
                .context("Equipment type modal is empty")?;
            Ok(details.to_string())
        }
        Commands::Draw { kind, name, output } => {
            let diagram = client
                .diagram(kind.into(), &name)
                .await
                .with_context(|| format!("Failed to draw {name}"))?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, &diagram.bytes)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    Ok(format!(
                        "wrote {} ({} bytes, {})\n",
                        path.display(),
                        diagram.bytes.len(),
                        diagram.media_type
                    ))
                }
                None => Ok(String::from_utf8_lossy(&diagram.bytes).into_owned()),
            }
        }
    }
}
