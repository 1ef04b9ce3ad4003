use mobtrack::{Entry, MoraleStatus, Snapshot};

/// One line per combatant, in display order.
pub fn render(snapshot: &Snapshot) -> String {
    if snapshot.entries.is_empty() {
        return "(no combatants)".to_string();
    }
    snapshot
        .entries
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_entry(entry: &Entry) -> String {
    let c = &entry.combatant;
    let icon = if c.is_alive() { "✓" } else { "X" };
    let mut line = format!(
        "[{}] [{}] {} ({}/{} HP) · {} · morale {}",
        entry.index,
        icon,
        c.name,
        c.hp,
        c.max_hp,
        c.kind,
        c.morale()
    );
    match c.morale_status {
        MoraleStatus::Normal => {}
        MoraleStatus::Panicked => line.push_str(" · PANICKED"),
        MoraleStatus::Routed => line.push_str(" · ROUTED"),
    }
    if c.stunned {
        line.push_str(" · STUNNED");
    }
    if let Some(xp) = &c.experience {
        line.push_str(&format!(" · XP {}", xp.total));
    }
    line
}
