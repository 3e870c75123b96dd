//! Screen rendering

use crate::game::{EquipFocus, GameState, Screen};
use combat_core::combat::{MemberView, MonsterView};
use combat_core::prelude::*;
use combat_core::set_bonus::character_bonuses;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const LOG_LINES: usize = 8;

pub fn draw(f: &mut Frame, state: &GameState) {
    match state.screen {
        Screen::Camp => draw_camp(f, state),
        Screen::Battle => draw_battle(f, state),
        Screen::Equipment => draw_equipment(f, state),
    }
}

fn bar(current: i32, max: i32, width: usize) -> String {
    let filled = if max > 0 {
        (current.max(0) as usize * width / max as usize).min(width)
    } else {
        0
    };
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

fn title(f: &mut Frame, area: Rect, text: String) {
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn controls(f: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn message_list<'a>(lines: impl IntoIterator<Item = &'a String>, title: &'a str) -> List<'a> {
    let items: Vec<ListItem> = lines.into_iter().map(|m| ListItem::new(m.as_str())).collect();
    List::new(items).block(Block::default().borders(Borders::ALL).title(title))
}

fn draw_camp(f: &mut Frame, state: &GameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Party
            Constraint::Length(8), // Messages
            Constraint::Length(3), // Controls
        ])
        .split(f.area());

    let snapshot = &state.snapshot;
    title(
        f,
        chunks[0],
        format!(
            "Dungeon Game - Floor {}    Gold: {}    Potions: {}    Bag: {}",
            snapshot.depth,
            snapshot.gold,
            snapshot.potions.len(),
            snapshot.bag.len()
        ),
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, 3); snapshot.party.len().max(1)])
        .split(chunks[1]);

    for (member, area) in snapshot.party.iter().zip(columns.iter()) {
        let sheet = stat_sheet(member, &state.data.sets);
        let stats = sheet.effective;
        let mut lines = vec![
            Line::from(vec![Span::styled(
                format!("{} the {}", member.name, member.job),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )]),
            Line::from(format!("Level {}  XP {}", member.level, member.xp)),
            Line::from(format!("HP {} {}/{}", bar(member.hp, stats.max_hp, 10), member.hp, stats.max_hp)),
            Line::from(format!("MP {} {}/{}", bar(member.mp, stats.max_mp, 10), member.mp, stats.max_mp)),
            Line::from(format!("ATK {}  DEF {}  SPD {}", stats.attack, stats.defense, stats.speed)),
            Line::from(format!(
                "Crit {}%  Evade {}%",
                sheet.combat.crit_chance, sheet.combat.evasion
            )),
        ];
        for bonus in character_bonuses(member, &state.data.sets) {
            if bonus.is_active() {
                lines.push(Line::from(vec![Span::styled(
                    format!("{} ({})", bonus.set_name, bonus.pieces),
                    Style::default().fg(Color::Magenta),
                )]));
            }
        }
        let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(member.name.as_str()));
        f.render_widget(widget, *area);
    }

    f.render_widget(message_list(&state.messages, "Messages"), chunks[2]);
    controls(
        f,
        chunks[3],
        "[F] Fight  [D] Descend  [A] Ascend  [R] Rest  [E] Equipment  [S] Save  [Q] Quit",
    );
}

fn monster_lines(index: usize, monster: &MonsterView, target: usize) -> Vec<Line<'static>> {
    let style = if !monster.alive {
        Style::default().fg(Color::DarkGray)
    } else if index == target {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };
    let prefix = if index == target && monster.alive { "> " } else { "  " };
    let mut lines = vec![
        Line::from(vec![Span::styled(format!("{prefix}{}", monster.name), style)]),
        Line::from(format!(
            "  {} {}/{}",
            bar(monster.hp, monster.max_hp, 10),
            monster.hp.max(0),
            monster.max_hp
        )),
    ];
    if !monster.statuses.is_empty() {
        lines.push(Line::from(format!("  {}", monster.statuses.join(", "))));
    }
    lines
}

fn member_lines(index: usize, member: &MemberView, current: Option<usize>) -> Vec<Line<'static>> {
    let style = if !member.alive {
        Style::default().fg(Color::DarkGray)
    } else if Some(index) == current {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let prefix = if Some(index) == current { "> " } else { "  " };
    let mut lines = vec![
        Line::from(vec![Span::styled(
            format!("{prefix}{} Lv{} {}", member.name, member.level, member.job),
            style,
        )]),
        Line::from(format!(
            "  HP {} {}/{}  MP {}/{}",
            bar(member.hp, member.max_hp, 10),
            member.hp,
            member.max_hp,
            member.mp,
            member.max_mp
        )),
    ];
    if !member.statuses.is_empty() {
        lines.push(Line::from(format!("  {}", member.statuses.join(", "))));
    }
    lines
}

fn draw_battle(f: &mut Frame, state: &GameState) {
    let Some(battle) = &state.battle else {
        return;
    };
    let view = battle.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                     // Title
            Constraint::Min(10),                       // Main content
            Constraint::Length(5),                     // Abilities
            Constraint::Length(LOG_LINES as u16 + 2), // Combat log
            Constraint::Length(3),                     // Controls
        ])
        .split(f.area());

    let defending = if view.defending { "    Defending" } else { "" };
    title(
        f,
        chunks[0],
        format!(
            "Floor {} - Round {} - {}{}",
            battle.depth(),
            view.round,
            view.phase,
            defending
        ),
    );

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let party_text: Vec<Line> = view
        .party
        .iter()
        .enumerate()
        .flat_map(|(i, m)| member_lines(i, m, view.current_actor))
        .collect();
    let party_widget = Paragraph::new(party_text).block(Block::default().borders(Borders::ALL).title("Party"));
    f.render_widget(party_widget, main_chunks[0]);

    let monster_text: Vec<Line> = view
        .monsters
        .iter()
        .enumerate()
        .flat_map(|(i, m)| monster_lines(i, m, view.target))
        .collect();
    let monster_widget = Paragraph::new(monster_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Monsters ({} left)", view.living_monsters())),
    );
    f.render_widget(monster_widget, main_chunks[1]);

    // Abilities
    let abilities = state.current_abilities();
    let ability_spans: Vec<Span> = abilities
        .iter()
        .enumerate()
        .flat_map(|(i, ability)| {
            let style = if i == state.selected_ability {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            vec![
                Span::styled(format!("{} ({} MP)", ability.name, ability.mp_cost), style),
                Span::raw("    "),
            ]
        })
        .collect();
    let description = abilities
        .get(state.selected_ability)
        .map(|a| a.description.clone())
        .unwrap_or_default();
    let potion = battle
        .potions()
        .get(state.selected_potion)
        .map(|p| format!("Potion: {} ({} left)", p.name, battle.potions().len()))
        .unwrap_or_else(|| "No potions".to_string());
    let ability_widget = Paragraph::new(vec![
        Line::from(ability_spans),
        Line::from(description),
        Line::from(potion),
    ])
    .block(Block::default().borders(Borders::ALL).title("Abilities"));
    f.render_widget(ability_widget, chunks[2]);

    f.render_widget(message_list(view.recent_log(LOG_LINES), "Combat Log"), chunks[3]);

    let hint = match view.phase {
        BattlePhase::PartyTurn => "[←/→] Target  [↑/↓] Ability  [Enter] Use  [Tab] Potion  [P] Drink  [F] Flee",
        BattlePhase::MonsterTurn => "[SPACE] Monsters act  [F] Flee",
        _ => "[SPACE] Continue",
    };
    controls(f, chunks[4], hint);
}

fn draw_equipment(f: &mut Frame, state: &GameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(5), Constraint::Length(3)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let Some(member) = state.snapshot.party.get(state.member_index) else {
        return;
    };

    // Equipment slots
    let slots = state.member_slots();
    let slot_items: Vec<ListItem> = slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let item_name = member
                .equipment
                .get(*slot)
                .map(|item| format!("{} ({})", item.display_name(), item.template.rarity))
                .unwrap_or_else(|| "[Empty]".to_string());
            let selected = i == state.slot_index;
            let prefix = if selected && state.equip_focus == EquipFocus::Slots {
                "> "
            } else {
                "  "
            };
            let style = if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{prefix}{}: {item_name}", slot.label())).style(style)
        })
        .collect();
    let stats = effective_stats(member, &state.data.sets);
    let equip_widget = List::new(slot_items).block(Block::default().borders(Borders::ALL).title(format!(
        "{} - ATK {} DEF {} HP {} MP {} SPD {}",
        member.name, stats.attack, stats.defense, stats.max_hp, stats.max_mp, stats.speed
    )));
    f.render_widget(equip_widget, columns[0]);

    // Bag
    let bag_items: Vec<ListItem> = state
        .snapshot
        .bag
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == state.bag_index;
            let prefix = if selected && state.equip_focus == EquipFocus::Bag {
                "> "
            } else {
                "  "
            };
            let style = if !item.template.allows(member.job) {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let s = item.stats();
            ListItem::new(format!(
                "{prefix}{} [{:?}] atk {} def {} hp {} mp {} spd {}",
                item.display_name(),
                item.template.kind,
                s.attack,
                s.defense,
                s.hp,
                s.mp,
                s.speed
            ))
            .style(style)
        })
        .collect();
    let bag_widget = List::new(bag_items).block(Block::default().borders(Borders::ALL).title("Bag"));
    f.render_widget(bag_widget, columns[1]);

    f.render_widget(message_list(&state.messages, "Messages"), chunks[1]);
    controls(
        f,
        chunks[2],
        "[↑/↓] Move  [Tab] Slots/Bag  [M] Member  [Enter] Equip  [U] Unequip  [Esc] Back",
    );
}
