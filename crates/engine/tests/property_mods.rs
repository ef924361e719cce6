// Property tests for the mod list and the export/import cycle.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;
use std::sync::Arc;

use ark_settings_engine::{ModList, Mode, Section, SettingValue, SettingsCatalog, SettingsSession};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Remove(usize),
    Up(usize),
    Down(usize),
}

fn arb_id() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => "[0-9]{1,7}",
        1 => "[a-z0-9 ]{0,5}",
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => arb_id().prop_map(Op::Add),
        1 => (0usize..12).prop_map(Op::Remove),
        2 => (0usize..12).prop_map(Op::Up),
        2 => (0usize..12).prop_map(Op::Down),
    ]
}

fn apply(mods: &mut ModList, op: &Op) {
    let _ = match op {
        Op::Add(id) => mods.add(id).map(|_| 0),
        Op::Remove(i) => mods.remove(*i).map(|_| 0),
        Op::Up(i) => mods.move_up(*i),
        Op::Down(i) => mods.move_down(*i),
    };
}

// ---------------------------------------------------------------------------
// Mod list
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn ops_keep_ids_unique_and_numeric(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut mods = ModList::new();
        for op in &ops {
            apply(&mut mods, op);
        }
        let unique: HashSet<&str> = mods.iter().collect();
        prop_assert_eq!(unique.len(), mods.len());
        for id in mods.iter() {
            prop_assert!(!id.is_empty());
            prop_assert!(id.bytes().all(|b| b.is_ascii_digit()), "bad id {:?}", id);
        }
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn csv_round_trips(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut mods = ModList::new();
        for op in &ops {
            apply(&mut mods, op);
        }
        let mut parsed = ModList::new();
        parsed.from_csv(&mods.to_csv()).unwrap();
        prop_assert_eq!(parsed, mods);
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn moves_preserve_membership(
        ids in prop::collection::hash_set("[0-9]{1,6}", 1..10),
        moves in prop::collection::vec((any::<bool>(), 0usize..10), 0..20),
    ) {
        let mut mods = ModList::new();
        for id in &ids {
            mods.add(id).unwrap();
        }
        for (up, i) in moves {
            let len = mods.len();
            let result = if up { mods.move_up(i) } else { mods.move_down(i) };
            match result {
                Ok(new) => prop_assert!(new < len),
                Err(_) => prop_assert!(i >= len),
            }
        }
        let after: HashSet<String> = mods.iter().map(str::to_string).collect();
        prop_assert_eq!(after, ids);
    }
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn export_import_restores_values(
        xp in 0.1f64..50.0,
        players in 1i64..200,
        hardcore in any::<bool>(),
        mature in 0.1f64..100.0,
        ids in prop::collection::vec("[0-9]{1,6}", 0..6),
        advanced in any::<bool>(),
        name in "[ a-zA-Z0-9:#;=]{0,16}",
    ) {
        let catalog = Arc::new(SettingsCatalog::builtin().unwrap());
        let mode = if advanced { Mode::Advanced } else { Mode::Basic };

        let mut source = SettingsSession::new(catalog.clone()).unwrap();
        source.set_mode(mode);
        source.on_edit(Section::ServerSettings, "XPMultiplier", &xp.to_string()).unwrap();
        source.on_edit(Section::ServerSettings, "MaxPlayers", &players.to_string()).unwrap();
        source.on_edit(Section::ServerSettings, "ServerHardcore", if hardcore { "True" } else { "False" }).unwrap();
        source.on_edit(Section::GameMode, "BabyMatureSpeedMultiplier", &mature.to_string()).unwrap();
        source.on_edit(Section::ServerSettings, "ServerName", &name).unwrap();
        for id in &ids {
            let _ = source.mods_mut().add(id);
        }
        let exported = source.on_generate();

        let mut target = SettingsSession::new(catalog).unwrap();
        target.set_mode(mode);
        let report = target.import(&[exported.game_user_settings.clone(), exported.game.clone()]).unwrap();
        prop_assert!(report.skipped.is_empty());

        prop_assert_eq!(target.on_generate(), exported);
        prop_assert_eq!(target.mods(), source.mods());
        prop_assert_eq!(
            target.store().get(Section::ServerSettings, "ServerName").unwrap(),
            &SettingValue::Str(name)
        );
    }
}
