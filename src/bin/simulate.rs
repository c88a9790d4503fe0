//! Headless quest balance simulator.
//!
//! Plays every quest with a simple bot at 60 Hz ticks, through the same
//! `QuestHost` the terminal game uses, and reports how often each quest
//! is won.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --runs N      Runs per quest with incrementing seeds (default: 1000)
//!   --seed N      Base RNG seed (default: 42)
//!   --quest ID    Only simulate one quest (window_witch, da_wire, ...)
//!   --quiet       Only the summary table

use kosh::core::constants::{ENERGY_PER_TRIP, WIRE_LICK_THRESHOLD};
use kosh::core::{GameRng, Key, QuestRng};
use kosh::effects::EffectSystem;
use kosh::quests::da_wire::WirePhase;
use kosh::quests::in_and_out::KoshSpot;
use kosh::quests::wardrobe::WardrobePhase;
use kosh::quests::window_witch::{Tactic, WitchPhase};
use kosh::{ActiveQuest, HostEvent, PlayerProfile, QuestHost, QuestId};

const DT: f64 = 1.0 / 60.0;
/// Give up on a run after this much simulated time.
const MAX_SECONDS: f64 = 600.0;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    runs: u32,
    seed: u64,
    quest: Option<QuestId>,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            seed: 42,
            quest: None,
            quiet: false,
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                config.runs = number(&args, i, "--runs");
            }
            "--seed" => {
                i += 1;
                config.seed = number(&args, i, "--seed");
            }
            "--quest" => {
                i += 1;
                match args.get(i).and_then(|id| QuestId::from_id(id)) {
                    Some(quest) => config.quest = Some(quest),
                    None => {
                        eprintln!("--quest requires one of: window_witch, da_wire, in_and_out, witch_in_wardrobe");
                        std::process::exit(1);
                    }
                }
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|raw| raw.parse()) {
        Some(Ok(value)) => value,
        _ => {
            eprintln!("{flag} requires a number");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "Kosh Quest Simulator\n\
         \n\
         Usage: simulate [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N     Runs per quest (default: 1000)\n\
         \x20 --seed N     Base RNG seed (default: 42)\n\
         \x20 --quest ID   Only simulate one quest\n\
         \x20 --quiet      Only the summary table\n\
         \x20 --help, -h   Show this help"
    );
}

// ── Statistics ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct QuestStats {
    runs: u32,
    wins: u32,
    timeouts: u32,
    energy_spent: u64,
    seconds: f64,
}

impl QuestStats {
    fn record(&mut self, run: &RunResult) {
        self.runs += 1;
        if run.won {
            self.wins += 1;
        }
        if run.timed_out {
            self.timeouts += 1;
        }
        self.energy_spent += u64::from(run.energy_spent);
        self.seconds += run.seconds;
    }

    fn win_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.runs) * 100.0
    }

    fn mean_energy(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.energy_spent as f64 / f64::from(self.runs)
    }

    fn mean_seconds(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.seconds / f64::from(self.runs)
    }
}

struct RunResult {
    won: bool,
    timed_out: bool,
    energy_spent: u32,
    seconds: f64,
    detail: String,
}

// ── Bots ─────────────────────────────────────────────────────────────

/// Per-run bot state. `jitter` is the bot's own randomness, separate from
/// the quest RNG.
struct Bot {
    jitter: GameRng,
    holding: bool,
    /// Seconds left before the bot reacts to a peek.
    reaction: Option<f64>,
}

impl Bot {
    fn new(seed: u64) -> Self {
        Self {
            jitter: GameRng::seeded(seed ^ 0x9E37_79B9_7F4A_7C15),
            holding: false,
            reaction: None,
        }
    }

    /// Decide and apply this frame's input.
    fn act(&mut self, host: &mut QuestHost<GameRng>) {
        let energy = host.profile().energy();
        let Some(active) = host.active() else {
            return;
        };
        match active {
            ActiveQuest::WindowWitch(quest) => {
                if let Some(egg) = quest.egg() {
                    let pos = egg.position();
                    host.click(pos);
                    return;
                }
                match quest.phase() {
                    WitchPhase::Resolving { .. } | WitchPhase::ConvinceWindow => {
                        host.key_down(Key::Confirm)
                    }
                    WitchPhase::ChoosingTactic(_) => {
                        let best = Tactic::ALL
                            .into_iter()
                            .filter(|t| t.energy_cost() <= energy)
                            .max_by(|a, b| a.success_rate().total_cmp(&b.success_rate()));
                        match best {
                            Some(tactic) if quest.selected_tactic() == tactic => {
                                host.key_down(Key::Confirm)
                            }
                            Some(_) => host.key_down(Key::Down),
                            None => {
                                host.abandon();
                            }
                        }
                    }
                    WitchPhase::Resolved => {}
                }
            }
            ActiveQuest::DaWire(quest) => match quest.phase() {
                WirePhase::TimingWindow => {
                    // Aim for the middle of the lick zone, with a shaky paw.
                    let aim = WIRE_LICK_THRESHOLD * 0.5 + self.jitter.draw_range(-0.1, 0.25);
                    if quest.wire_position().abs() < aim {
                        host.key_down(Key::Action);
                        self.holding = true;
                    }
                }
                WirePhase::Hold => {
                    // Sometimes lets go a frame too early.
                    if self.holding && self.jitter.chance(0.01) {
                        host.key_up(Key::Action);
                        self.holding = false;
                    }
                }
                WirePhase::RoundResult => {
                    if self.holding {
                        host.key_up(Key::Action);
                        self.holding = false;
                    }
                    host.key_down(Key::Confirm);
                }
                WirePhase::Watch => {}
            },
            ActiveQuest::InAndOut(quest) => match quest.spot() {
                KoshSpot::Inside if energy < ENERGY_PER_TRIP && quest.trips() > 0 => {
                    host.key_down(Key::Confirm)
                }
                KoshSpot::Inside => host.key_down(Key::Action),
                KoshSpot::Outside => host.key_down(Key::Confirm),
                KoshSpot::TravelingOut | KoshSpot::TravelingBack => {}
            },
            ActiveQuest::Wardrobe(quest) => {
                if quest.phase() != WardrobePhase::Peeking {
                    self.reaction = None;
                    return;
                }
                let target = quest.target();
                let left = match self.reaction {
                    Some(left) => left - DT,
                    None => self.jitter.draw_range(0.35, 0.9),
                };
                if left > 0.0 {
                    self.reaction = Some(left);
                    return;
                }
                self.reaction = None;
                if let Some(target) = target {
                    host.click(target);
                }
            }
        }
    }
}

fn run_once(quest: QuestId, seed: u64) -> RunResult {
    let mut profile = PlayerProfile::new();
    if quest.is_secret() {
        profile.unlock_secret();
    }
    let start_energy = profile.energy();
    let mut host = QuestHost::with_effects(profile, EffectSystem::seeded(seed), GameRng::seeded(seed));
    let mut bot = Bot::new(seed);

    if let Err(e) = host.start(quest) {
        return RunResult {
            won: false,
            timed_out: false,
            energy_spent: 0,
            seconds: 0.0,
            detail: e.to_string(),
        };
    }

    let mut seconds = 0.0;
    while seconds < MAX_SECONDS {
        bot.act(&mut host);
        host.tick(DT);
        seconds += DT;

        for event in host.take_events() {
            let (won, detail) = match event {
                HostEvent::QuestTerminated(outcome) => (outcome.is_success(), outcome.detail),
                HostEvent::QuestAbandoned(_) => (false, "Bot gave up".to_string()),
                HostEvent::SecretUnlocked => continue,
            };
            return RunResult {
                won,
                timed_out: false,
                energy_spent: start_energy - host.profile().energy(),
                seconds,
                detail,
            };
        }
    }

    host.abandon();
    RunResult {
        won: false,
        timed_out: true,
        energy_spent: start_energy - host.profile().energy(),
        seconds,
        detail: "Timed out".to_string(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = parse_args();
    let quests: Vec<QuestId> = match config.quest {
        Some(quest) => vec![quest],
        None => QuestId::ALL.to_vec(),
    };

    if !config.quiet {
        println!("╔═══════════════════════════════════════════════╗");
        println!("║             KOSH QUEST SIMULATOR              ║");
        println!("╚═══════════════════════════════════════════════╝");
        println!();
        println!("  Runs per quest: {}", config.runs);
        println!("  Seed:           {}", config.seed);
        println!();
    }

    let mut table = Vec::new();
    for quest in quests {
        let mut stats = QuestStats::default();
        for run in 0..config.runs {
            let result = run_once(quest, config.seed.wrapping_add(u64::from(run)));
            if !config.quiet && run < 3 {
                println!("  {:<22} run {run}: {}", quest.title(), result.detail);
            }
            stats.record(&result);
        }
        table.push((quest, stats));
    }

    if !config.quiet {
        println!();
    }
    println!(
        "{:<22} {:>8} {:>10} {:>10} {:>9}",
        "Quest", "Win %", "Energy", "Seconds", "Timeouts"
    );
    println!("{}", "─".repeat(63));
    for (quest, stats) in &table {
        println!(
            "{:<22} {:>7.1}% {:>10.1} {:>10.1} {:>9}",
            quest.title(),
            stats.win_rate(),
            stats.mean_energy(),
            stats.mean_seconds(),
            stats.timeouts
        );
    }
}
