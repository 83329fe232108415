//! Rendu texte des vues pour le terminal.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use racksweb_core::criteria::ActiveFilter;
use racksweb_core::grouping::RackGroup;
use racksweb_core::models::{Datacenter, Infrastructure};
use racksweb_core::views::{count_label, dimensions_label, list_label, RoomRackSummary, RoomSummary};

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn datacenters(datacenters: &[Datacenter]) -> String {
    let mut table = table(&["NAME", "ROOMS", "TAGS"]);
    for dc in datacenters {
        table.add_row(vec![
            dc.name.clone(),
            dc.rooms.len().to_string(),
            list_label(&dc.tags),
        ]);
    }
    format!("{}\n{}", count_label(datacenters.len(), "datacenter"), table)
}

pub fn infrastructures(placeholder: &str, matches: &[&Infrastructure]) -> String {
    if matches.is_empty() {
        return format!("{placeholder}: no match\n");
    }
    let mut table = table(&["NAME", "DESCRIPTION", "TAGS"]);
    for infra in matches {
        table.add_row(vec![
            infra.name.clone(),
            infra.description.clone().unwrap_or_else(|| "-".into()),
            list_label(&infra.tags),
        ]);
    }
    format!("{}\n{}", count_label(matches.len(), "infrastructure"), table)
}

pub fn rooms(datacenter: &str, rooms: &[RoomSummary]) -> String {
    let mut table = table(&["ROOM", "DIMENSIONS", "RACKS"]);
    for room in rooms {
        table.add_row(vec![
            room.name.clone(),
            dimensions_label(room.dimensions.as_ref()),
            room.racks.to_string(),
        ]);
    }
    format!("{datacenter}: {}\n{}", count_label(rooms.len(), "room"), table)
}

pub fn room_racks(room: &str, racks: &[RoomRackSummary]) -> String {
    let mut table = table(&["RACK", "FILL RATE", "INFRASTRUCTURES"]);
    for rack in racks {
        table.add_row(vec![
            rack.name.clone(),
            format!("{}%", rack.fill_percent),
            list_label(&rack.infrastructures),
        ]);
    }
    format!("{room}: {}\n{}", count_label(racks.len(), "rack"), table)
}

/// Vue groupée par rack : badges actifs, puis un bloc par rack
pub fn equipment_view(infrastructure: &str, badges: &[ActiveFilter], groups: &[RackGroup<'_>]) -> String {
    let mut out = String::new();
    let visible: usize = groups.iter().map(|g| g.records.len()).sum();
    out.push_str(&format!("{infrastructure}: {}\n", count_label(visible, "item")));
    if !badges.is_empty() {
        let labels: Vec<String> = badges.iter().map(ToString::to_string).collect();
        out.push_str(&format!("filters: {}\n", labels.join(", ")));
    }

    if groups.is_empty() {
        out.push_str("No equipment matches the current filters.\n");
        return out;
    }

    for group in groups {
        let marker = if group.expanded { '▾' } else { '▸' };
        out.push_str(&format!("{marker} {} ({})\n", group.rack, group.records.len()));
        if !group.expanded {
            continue;
        }
        let mut table = table(&["NAME", "CATEGORY", "TYPE", "TAGS"]);
        for record in &group.records {
            table.add_row(vec![
                record.name.clone(),
                record.category.to_string(),
                record.type_id().to_string(),
                list_label(&record.tags),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }
    out
}
