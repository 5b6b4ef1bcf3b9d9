use anyhow::{anyhow, ensure, Result};
use bounded_sync::{BoundedPriorityQueue, TaskLimiter};
use clap::Parser;
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Marks the end of the stream for one consumer.
const STOP: isize = isize::MAX;

#[derive(Parser, Debug)]
#[command(name = "threads-demo")]
#[command(about = "Producer/consumer and task limiter demo on OS threads", long_about = None)]
struct Args {
    /// Queue capacity
    #[arg(long, default_value = "5000")]
    capacity: usize,

    /// Number of entries the producer pushes
    #[arg(long, default_value = "50000")]
    items: usize,

    /// Number of consumer threads
    #[arg(long, default_value = "3")]
    consumers: usize,

    /// Highest priority (exclusive) assigned to entries
    #[arg(long, default_value = "5")]
    priorities: isize,

    /// Concurrently running tasks allowed by the limiter
    #[arg(long, default_value = "2")]
    limiter_capacity: usize,

    /// Number of tasks run through the limiter
    #[arg(long, default_value = "10")]
    tasks: usize,

    /// How long each limited task works, in milliseconds
    #[arg(long, default_value = "1000")]
    task_millis: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    ensure!(args.consumers > 0, "at least one consumer is required");
    ensure!(args.priorities > 0, "priorities must be positive");

    run_queue(&args)?;
    run_limiter(&args)?;
    Ok(())
}

fn run_queue(args: &Args) -> Result<()> {
    let queue = Arc::new(BoundedPriorityQueue::new(args.capacity));
    let started = Instant::now();

    let producer = {
        let queue = Arc::clone(&queue);
        let (items, priorities) = (args.items, args.priorities);
        thread::spawn(move || {
            info!(items, "producer started");
            let mut rng = rand::thread_rng();
            for i in 1..=items {
                queue.push_blocking(format!("item_{i}"), rng.gen_range(0..priorities));
            }
            info!("producer finished");
        })
    };

    let consumers: Vec<_> = (0..args.consumers)
        .map(|id| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut popped = 0usize;
                loop {
                    let entry = queue.pop_blocking();
                    if entry.priority() == STOP {
                        break;
                    }
                    debug!(
                        consumer = id,
                        key = entry.key(),
                        priority = entry.priority(),
                        "popped"
                    );
                    popped += 1;
                }
                info!(consumer = id, popped, "consumer finished");
                popped
            })
        })
        .collect();

    producer
        .join()
        .map_err(|_| anyhow!("producer thread panicked"))?;
    for _ in 0..args.consumers {
        queue.push_blocking("stop", STOP);
    }

    let mut total = 0;
    for consumer in consumers {
        total += consumer
            .join()
            .map_err(|_| anyhow!("consumer thread panicked"))?;
    }

    ensure!(
        total == args.items,
        "popped {total} entries, expected {}",
        args.items
    );
    info!(total, elapsed = ?started.elapsed(), "queue drained");
    Ok(())
}

fn run_limiter(args: &Args) -> Result<()> {
    let limiter = Arc::new(TaskLimiter::new(args.limiter_capacity));
    let work = Duration::from_millis(args.task_millis);
    let started = Instant::now();

    for task in 0..args.tasks {
        limiter.register(1)?;
        let limiter = Arc::clone(&limiter);
        thread::spawn(move || {
            info!(task, pending = limiter.pending(), "task running");
            thread::sleep(work);
            limiter.complete();
        });
    }

    limiter.join();
    info!(tasks = args.tasks, elapsed = ?started.elapsed(), "all limited tasks finished");
    Ok(())
}
