use mobtrack::{Dice, Kind, MoraleStatus, Status, Tracker, TrackerConfig};

fn tracker() -> Tracker {
    Tracker::with_dice(&TrackerConfig::default(), Dice::from_seed(7))
}

/// Run a line and hand back (refresh, output).
fn run(t: &mut Tracker, line: &str) -> (bool, Vec<String>) {
    let refresh = t.exec(line);
    (refresh, t.take_output())
}

fn run_ok(t: &mut Tracker, line: &str) {
    let (refresh, out) = run(t, line);
    assert!(refresh, "`{}` should refresh, got {:?}", line, out);
}

fn error_of(t: &mut Tracker, line: &str) -> String {
    let (refresh, out) = run(t, line);
    assert!(!refresh, "`{}` should not refresh", line);
    out.into_iter()
        .find(|l| l.starts_with("Error: "))
        .unwrap_or_else(|| panic!("`{}` produced no error", line))
}

#[test]
fn blank_lines_do_nothing() {
    let mut t = tracker();
    assert_eq!(run(&mut t, ""), (false, vec![]));
    assert_eq!(run(&mut t, "   "), (false, vec![]));
}

#[test]
fn unknown_commands_are_reported() {
    let mut t = tracker();
    assert_eq!(
        run(&mut t, "fly 1"),
        (false, vec!["Unknown command: fly".to_string()])
    );
    // command names are case-sensitive
    assert_eq!(run(&mut t, "ADD goblin 7").0, false);
    assert!(t.registry().is_empty());
}

#[test]
fn add_with_kind_and_clamped_morale() {
    let mut t = tracker();
    t.dice_mut().queue_totals([9]);
    run_ok(&mut t, "add Orc 2d6 pc 15");
    let orc = t.registry().find("1").unwrap();
    assert_eq!(orc.name, "Orc");
    assert_eq!(orc.kind, Kind::PlayerCharacter);
    assert_eq!(orc.hp, 9);
    assert_eq!(orc.morale(), 12);
}

#[test]
fn quoted_names_survive_tokenizing() {
    let mut t = tracker();
    run_ok(&mut t, r#"add "cave troll" 30"#);
    assert_eq!(t.registry().find("1").unwrap().name, "Cave Troll");
}

#[test]
fn damage_scenario() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 7");
    let (refresh, out) = run(&mut t, "damage 1 2");
    assert!(refresh);
    assert!(out.contains(&"[DMG][Goblin] 7 → 5 (−2)".to_string()));
    let g = t.registry().find("1").unwrap();
    assert_eq!(g.hp, 5);
    assert!(g.stunned);
    assert_eq!(g.status, Status::Alive);
}

#[test]
fn bad_arguments_leave_state_alone() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 7");
    assert!(error_of(&mut t, "damage 9 2").contains("invalid index '9'"));
    assert!(error_of(&mut t, "damage 1 lots").contains("invalid amount"));
    assert!(error_of(&mut t, "damage 1").contains("usage: damage <index> <amount>"));
    assert_eq!(t.registry().find("1").unwrap().hp, 7);
}

#[test]
fn negative_damage_heals_without_stunning() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 7");
    run_ok(&mut t, "damage 1 4");
    run_ok(&mut t, "unstun 1");

    let (refresh, out) = run(&mut t, "damage 1 -2");
    assert!(refresh);
    assert_eq!(out, vec!["[DMG][Goblin] 3 → 5 (+2)"]);
    let goblin = t.registry().find("1").unwrap();
    assert_eq!(goblin.hp, 5);
    assert!(!goblin.stunned);
}

#[test]
fn kind_accepts_only_pc_or_mob() {
    let mut t = tracker();
    assert!(error_of(&mut t, "add goblin 7 npc").contains("(expected one of: pc, mob)"));
    run_ok(&mut t, "add aldric 20 PC");
    assert_eq!(t.registry().find("1").unwrap().kind, Kind::PlayerCharacter);
}

#[test]
fn bad_dice_creates_nobody() {
    let mut t = tracker();
    assert!(error_of(&mut t, "add goblin 2d").contains("invalid dice expression"));
    assert!(error_of(&mut t, "add goblin 7 boss").contains("unknown kind 'boss'"));
    assert!(t.registry().is_empty());
}

#[test]
fn bad_morale_is_only_a_warning() {
    let mut t = tracker();
    let (refresh, out) = run(&mut t, "add goblin 7 mob brave");
    assert!(refresh);
    assert!(out.iter().any(|l| l.contains("invalid morale 'brave'")));
    assert_eq!(t.registry().find("1").unwrap().morale(), 7);
}

#[test]
fn set_validates_each_property() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 7");
    run_ok(&mut t, "set morale 1 20");
    run_ok(&mut t, "set minHp 1 -3");
    run_ok(&mut t, "set stunned 1 TRUE");
    run_ok(&mut t, "set moraleStatus 1 Routed");
    run_ok(&mut t, "set status 1 defeated");
    let g = t.registry().find("1").unwrap();
    assert_eq!(g.morale(), 12);
    assert_eq!(g.min_hp, -3);
    assert!(g.stunned);
    assert_eq!(g.morale_status, MoraleStatus::Routed);
    assert_eq!(g.status, Status::Defeated);

    let err = error_of(&mut t, "set hp 1 3");
    assert!(err.contains("unknown property 'hp'"));
    assert!(err.contains("morale, minHp, stunned, moraleStatus, status"));
    assert!(error_of(&mut t, "set stunned 1 maybe").contains("expected one of: true, false"));
    assert!(error_of(&mut t, "set morale 1 high").contains("invalid morale"));
    assert!(error_of(&mut t, "set status 4 alive").contains("invalid index"));
    assert_eq!(t.registry().find("1").unwrap().status, Status::Defeated);
}

#[test]
fn status_can_be_revived_by_hand() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 3");
    run_ok(&mut t, "damage 1 3");
    assert_eq!(t.registry().find("1").unwrap().status, Status::Defeated);
    run_ok(&mut t, "set status 1 alive");
    assert_eq!(t.registry().find("1").unwrap().status, Status::Alive);
}

#[test]
fn morale_checks_through_the_dispatcher() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 7");
    t.dice_mut().queue_faces([6, 6]);
    run_ok(&mut t, "check boldness 1");
    assert_eq!(t.registry().find("1").unwrap().morale(), 8);

    t.dice_mut().queue_faces([1, 1]);
    run_ok(&mut t, "check braveness 1");
    assert_eq!(
        t.registry().find("1").unwrap().morale_status,
        MoraleStatus::Panicked
    );

    t.dice_mut().queue_faces([5, 5]);
    run_ok(&mut t, "rally 1");
    assert_eq!(
        t.registry().find("1").unwrap().morale_status,
        MoraleStatus::Normal
    );

    assert!(error_of(&mut t, "check courage 1").contains("braveness, boldness, panic, rally"));
}

#[test]
fn rally_when_steady_is_a_reported_no_op() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 7");
    let (refresh, out) = run(&mut t, "check rally 1");
    assert!(refresh);
    assert_eq!(out, vec!["[MORALE][Goblin] rally: already normal".to_string()]);
}

#[test]
fn combat_keeps_xp_current() {
    let mut t = tracker();
    run_ok(&mut t, "add aldric 25 pc");
    run_ok(&mut t, "add goblin 7");
    run_ok(&mut t, "combat 1 2 4");
    let xp = t.registry().find("1").unwrap().experience.unwrap();
    assert_eq!((xp.from_damage_dealt, xp.total), (40, 40));

    run_ok(&mut t, "combat 2 1 10");
    let xp = t.registry().find("1").unwrap().experience.unwrap();
    assert_eq!(xp.from_damage_taken, 200);
    assert_eq!(xp.bonus, 200);
    assert_eq!(xp.total, 440);

    let (refresh, out) = run(&mut t, "xp show");
    assert!(!refresh);
    assert_eq!(
        out,
        vec!["[XP][Aldric] taken 10 (200) + dealt 4 (40) + bonus 200 = 440".to_string()]
    );

    run_ok(&mut t, "reset");
    let xp = t.registry().find("1").unwrap().experience.unwrap();
    assert_eq!(xp.total, 0);
    run_ok(&mut t, "xp");
    run_ok(&mut t, "xp calculate");
    assert!(error_of(&mut t, "xp tally").contains("unknown xp mode"));
}

#[test]
fn remove_and_clear() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 7");
    run_ok(&mut t, "add orc 15");
    run_ok(&mut t, "add aldric 25 pc");
    run_ok(&mut t, "remove #1");
    let names: Vec<_> = t.registry().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Aldric", "Orc"]);

    assert!(error_of(&mut t, "clear goblins").contains("pcs, mobs, all"));
    run_ok(&mut t, "clear mobs");
    assert_eq!(t.registry().len(), 1);
    run_ok(&mut t, "clear all");
    assert!(t.registry().is_empty());
}

#[test]
fn unstun_clears_the_flag() {
    let mut t = tracker();
    run_ok(&mut t, "add goblin 7");
    run_ok(&mut t, "damage 1 5");
    assert!(t.registry().find("1").unwrap().stunned);
    run_ok(&mut t, "unstun 1");
    assert!(!t.registry().find("1").unwrap().stunned);
}

#[test]
fn informational_commands_do_not_refresh() {
    let mut t = tracker();
    let (refresh, out) = run(&mut t, "help");
    assert!(!refresh);
    assert!(out.iter().any(|l| l.contains("add <name> <hp-expr> [pc|mob] [morale]")));

    t.dice_mut().queue_totals([9]);
    assert_eq!(
        run(&mut t, "roll 2d6"),
        (false, vec!["[ROLL] 2d6 = 9".to_string()])
    );
    assert!(run(&mut t, "list").0);
}

#[test]
fn unterminated_quote_is_reported() {
    let mut t = tracker();
    assert!(error_of(&mut t, r#"add "goblin 7"#).contains("unterminated"));
}

#[test]
fn exit_raises_the_flag() {
    let mut t = tracker();
    assert!(!t.exit_requested());
    assert!(!t.exec("exit"));
    assert!(t.exit_requested());
}

#[test]
fn config_can_narrow_the_command_table() {
    let cfg = TrackerConfig {
        commands: Some(vec!["add".into()]),
        ..Default::default()
    };
    let mut t = Tracker::with_dice(&cfg, Dice::from_seed(1));
    let names: Vec<_> = t.commands().map(|c| c.name()).collect();
    assert_eq!(names, vec!["add", "help", "exit"]);
    run_ok(&mut t, "add goblin 7");
    assert_eq!(
        run(&mut t, "damage 1 2"),
        (false, vec!["Unknown command: damage".to_string()])
    );
}
