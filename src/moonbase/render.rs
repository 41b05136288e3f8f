//! Moonbase rendering: header, innovation center, shop/moonbase panels, log,
//! tutorial overlay and win screen.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::catalog::Module;
use super::logic::{self, format_compact, format_number, format_playtime};
use super::state::ResourceState;
use super::tutorial::{self, TUTORIAL_STEPS};
use super::{InvestStake, MoonbaseGame, Panel};

const BAR_WIDTH: usize = 20;

pub fn render(game: &MoonbaseGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let state = game.session.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_header(game, f, chunks[0]);

    if state.is_won {
        render_win(game, f, chunks[1], click_state);
        return;
    }

    // Log panel on the right when wide enough
    let (main_area, log_area) = if area.width >= 80 {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        (h[0], Some(h[1]))
    } else {
        (chunks[1], None)
    };

    let log_height = if log_area.is_none() { 6 } else { 0 };
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),          // innovation center
            Constraint::Length(3),          // tab bar
            Constraint::Min(5),             // panel
            Constraint::Length(log_height), // log (narrow only)
        ])
        .split(main_area);

    render_click_center(state, f, main[0], click_state);
    render_tab_bar(game.panel, f, main[1], click_state);
    match game.panel {
        Panel::Upgrades => render_upgrades(game, f, main[2], click_state),
        Panel::Owned => render_owned(game, f, main[2]),
        Panel::Moonbase => render_moonbase(state, game, f, main[2], click_state),
    }

    match log_area {
        Some(log_area) => render_log(state, f, log_area),
        None => render_log(state, f, main[3]),
    }

    if game.in_tutorial() {
        render_tutorial(game.tutorial_step, f, area, click_state);
    }
}

fn render_header(game: &MoonbaseGame, f: &mut Frame, area: Rect) {
    let state = game.session.state();
    let overall = game.session.overall_progress();

    let title = if is_narrow_layout(area.width) { " 🚀 " } else { " 🚀 Wichita to the Moon " };
    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} IC ", format_compact(state.capital)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" +{}/click ", format_number(state.effective_click_power())),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(" +{}/s ", format_number(state.effective_passive_rate())),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!(" 🌙 {:.0}% ", overall),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}

fn render_click_center(
    state: &ResourceState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(Span::styled(
            format!("[C] INNOVATE!  +{} IC", format_number(state.effective_click_power())),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        CLICK_CENTER,
    );
    cl.push(Line::from(Span::styled(
        format!(
            "{} IC on hand · {} clicks",
            format_number(state.capital.floor()),
            format_number(state.total_clicks as f64)
        ),
        Style::default().fg(Color::Gray),
    )));

    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Innovation Center "),
        );
    f.render_widget(widget, area);

    // The whole panel is one big button.
    click_state.borrow_mut().add_click_target(area, CLICK_CENTER);
}

fn render_tab_bar(panel: Panel, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let tab_style = |active: bool, color: Color| -> Style {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    let mut cs = click_state.borrow_mut();
    TabBar::new(" │ ")
        .tab("Upgrades", tab_style(panel == Panel::Upgrades, Color::Cyan), TAB_UPGRADES)
        .tab("Owned", tab_style(panel == Panel::Owned, Color::Green), TAB_OWNED)
        .tab("Moonbase", tab_style(panel == Panel::Moonbase, Color::Magenta), TAB_MOONBASE)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" [U] switch "),
        )
        .render(f, area, &mut cs);
}

fn render_upgrades(
    game: &MoonbaseGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = game.session.state();
    let catalog = game.session.catalog();
    let policy = game.session.config().purchase_policy;
    let available = logic::available_upgrades(state, catalog, policy);

    let mut cl = ClickableList::new();
    if available.is_empty() {
        cl.push(Line::from(Span::styled(
            " (all upgrades unlocked)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, (upgrade, key)) in available.iter().zip(UPGRADE_KEYS).enumerate() {
        let affordable = logic::can_afford(state, upgrade);
        let key_style = if affordable {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text_style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let count = state.purchase_count(&upgrade.id);
        let owned = if count > 0 { format!(" x{}", count) } else { String::new() };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", key), key_style),
                Span::styled(format!("{} {}{}", upgrade.icon, upgrade.name, owned), text_style),
                Span::styled(
                    format!("  {} IC", format_number(upgrade.cost)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("  {}", upgrade.effect.describe()),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            BUY_UPGRADE_BASE + i as u16,
        );
    }

    let selected = game.selected_upgrade.and_then(|i| catalog.upgrades.get(i));
    if let Some(upgrade) = selected {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            format!(" {} {}", upgrade.icon, upgrade.description),
            Style::default().fg(Color::Gray),
        )));
        if let Some(fact) = &upgrade.wichita_fact {
            cl.push(Line::from(Span::styled(
                format!(" 💡 {}", fact),
                Style::default().fg(Color::LightBlue),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            " Upgrades {}/{} ",
            logic::upgrades_unlocked(state),
            catalog.upgrades.len()
        ));
    let inner = block.inner(area);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, inner.width);
    }
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_owned(game: &MoonbaseGame, f: &mut Frame, area: Rect) {
    let state = game.session.state();
    let owned = logic::purchased_upgrades(state, game.session.catalog());

    let mut lines = Vec::new();
    if owned.is_empty() {
        lines.push(Line::from(Span::styled(
            " Nothing bought yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for upgrade in &owned {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} {}", upgrade.icon, upgrade.name),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!(" x{}", state.purchase_count(&upgrade.id)),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  {}", upgrade.effect.describe()),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(format!(" Owned {} ", owned.len()));
    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn module_color(progress: f64) -> Color {
    if progress >= 100.0 {
        Color::Green
    } else if progress >= 50.0 {
        Color::Yellow
    } else {
        Color::Magenta
    }
}

fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress / 100.0) * width as f64).floor() as usize;
    let filled = filled.min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

fn module_lines(
    state: &ResourceState,
    module: &Module,
    key: char,
    stake: InvestStake,
) -> (Line<'static>, Line<'static>) {
    let progress = state.progress(&module.id).unwrap_or(0.0);
    let color = module_color(progress);

    let status = if logic::is_complete(state, module) {
        Span::styled("  ✓ complete", Style::default().fg(Color::Green))
    } else {
        let invest = stake.amount(state, module);
        Span::styled(
            format!("  invest {} IC", format_number(invest)),
            Style::default().fg(if invest > 0.0 { Color::Yellow } else { Color::DarkGray }),
        )
    };

    let title = Line::from(vec![
        Span::styled(
            format!(" [{}] ", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} {}", module.icon, module.name),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("  {:.1}%", progress), Style::default().fg(color)),
        status,
    ]);
    let bar = Line::from(vec![
        Span::raw("     "),
        Span::styled(progress_bar(progress, BAR_WIDTH), Style::default().fg(color)),
        Span::styled(
            format!(
                " {} / {}",
                format_compact(module.required_capital - logic::module_remaining(state, module)),
                format_compact(module.required_capital)
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    (title, bar)
}

fn render_stake_bar(stake: InvestStake, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut bar = TabBar::new(" ");
    for (i, s) in InvestStake::ALL.iter().enumerate() {
        let style = if *s == stake {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        bar = bar.tab(s.label(), style, INVEST_STAKE_BASE + i as u16);
    }
    bar.render(f, area, &mut click_state.borrow_mut());
}

fn render_moonbase(
    state: &ResourceState,
    game: &MoonbaseGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(
            " Moonbase {:.0}% · [-/=] stake ",
            game.session.overall_progress()
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    // Stake selector on the first row, modules below it.
    let stake_row = Rect::new(inner.x, inner.y, inner.width, 1);
    let list_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
    render_stake_bar(game.stake, f, stake_row, click_state);

    let mut cl = ClickableList::new();
    let modules = game.session.catalog().modules.iter().zip(MODULE_KEYS);
    for (i, (module, key)) in modules.enumerate() {
        let (title, bar) = module_lines(state, module, key, game.stake);
        let action = INVEST_MODULE_BASE + i as u16;
        cl.push_clickable(title, action);
        cl.push_clickable(bar, action);
    }
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(list_area, &mut cs, 0, 0, 0, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()), list_area);
}

fn render_log(state: &ResourceState, f: &mut Frame, area: Rect) {
    if area.height < 3 {
        return;
    }
    let lines: Vec<Line> = state
        .log
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Log ");
    let inner = block.inner(area);

    // Keep the newest entry on the last visible row.
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width) as u16;
    let scroll = total.saturating_sub(inner.height);
    f.render_widget(paragraph.scroll((scroll, 0)).block(block), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

fn render_tutorial(step: usize, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let Some(current) = tutorial::step(step) else {
        return;
    };
    let next_label = if tutorial::is_last(step) { "[N] Start!" } else { "[N] Next" };

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        current.title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(current.description, Style::default().fg(Color::White))));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!("Step {} of {}", step + 1, TUTORIAL_STEPS.len()),
        Style::default().fg(Color::DarkGray),
    )));
    cl.push_clickable(
        Line::from(Span::styled(
            next_label,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        TUTORIAL_NEXT,
    );
    cl.push_clickable(
        Line::from(Span::styled("[S] Skip tutorial", Style::default().fg(Color::DarkGray))),
        TUTORIAL_SKIP,
    );

    let width = 56u16.min(area.width);
    let popup = centered(area, width, cl.visual_height(width.saturating_sub(2)) + 2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" How to play ");
    let inner = block.inner(popup);

    f.render_widget(Clear, popup);
    {
        let mut cs = click_state.borrow_mut();
        // Overlay swallows taps meant for the panels underneath.
        cs.clear_targets();
        cl.register_targets(popup, &mut cs, 1, 1, 0, inner.width);
    }
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, popup);
}

fn render_win(game: &MoonbaseGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let state = game.session.state();
    let catalog = game.session.catalog();
    let playtime = game.session.playtime_secs(game.now_ms());

    let stat = |label: &str, value: String| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>24}: ", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ])
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "🌙 MOONBASE COMPLETE! 🚀",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(
        "Wichita's innovators have reached the Moon.",
        Style::default().fg(Color::Cyan),
    )));
    cl.push(Line::from(""));
    cl.push(stat("Time Played", format_playtime(playtime)));
    cl.push(stat(
        "Innovation Capital Generated",
        format_number(state.capital_earned.floor()),
    ));
    cl.push(stat("Total Clicks", format_number(state.total_clicks as f64)));
    cl.push(stat(
        "Upgrades Unlocked",
        format!("{}/{}", logic::upgrades_unlocked(state), catalog.upgrades.len()),
    ));
    let icons: Vec<&str> = logic::purchased_upgrades(state, catalog)
        .iter()
        .map(|u| u.icon.as_str())
        .collect();
    if !icons.is_empty() {
        cl.push(Line::from(Span::styled(icons.join(" "), Style::default().fg(Color::Cyan))));
    }
    if let Some(fact) = game.win_fact {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            "DID YOU KNOW?",
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        )));
        cl.push(Line::from(Span::styled(fact, Style::default().fg(Color::White))));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            "[R] Play Again",
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        PLAY_AGAIN,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Mission Accomplished ");
    let inner = block.inner(area);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, inner.width);
    }
    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
