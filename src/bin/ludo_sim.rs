use clap::Parser;
use ludo_five::core::PlayerMap;
use ludo_five::driver::{Match, MatchConfig};
use ludo_five::search::SearchConfig;

#[derive(Debug, Parser)]
#[command(name = "ludo-sim", about = "Play all-computer five-player Ludo matches")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 10)]
    games: u64,

    /// Seed of the first game; game i uses seed + i
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Search depth in plies
    #[arg(short, long, default_value_t = 2)]
    depth: u32,

    /// Search root candidates in parallel
    #[arg(long)]
    parallel: bool,

    /// Step budget per game
    #[arg(long, default_value_t = 10_000)]
    max_steps: usize,

    /// Print one JSON summary per game instead of the win table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let search = SearchConfig::default()
        .with_depth(args.depth)
        .with_parallel(args.parallel);

    let mut wins: PlayerMap<u64> = PlayerMap::with_value(0);
    let mut unfinished = 0u64;
    let mut total_steps = 0u64;

    for game in 0..args.games {
        let config = MatchConfig::default()
            .with_seed(args.seed.wrapping_add(game))
            .with_max_steps(args.max_steps)
            .with_search(search.clone());
        let summary = Match::new(config).play();

        total_steps += u64::from(summary.steps);
        match summary.winner {
            Some(winner) => wins[winner] += 1,
            None => unfinished += 1,
        }

        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        }
    }

    if !args.json {
        println!("games: {}  depth: {}  parallel: {}", args.games, args.depth, args.parallel);
        for (player, count) in wins.iter() {
            println!("  {player}: {count} wins");
        }
        if unfinished > 0 {
            println!("  unfinished: {unfinished}");
        }
        if args.games > 0 {
            println!("  mean steps: {:.1}", total_steps as f64 / args.games as f64);
        }
    }

    Ok(())
}
