use std::time::{Duration, Instant};

use log::info;

use digraph_engine::algorithm::dijkstra::{DialDijkstra, RadixDijkstra};
use digraph_engine::algorithm::label_correcting::{DequeLabelCorrecting, QueueLabelCorrecting};
use digraph_engine::graph::generators::{clustered_2d, epsilon_dense, random_weighted_graph, DEFAULT_SEED};
use digraph_engine::{DirectedGraph, ShortestPathAlgorithm, ShortestPathResult, WeightedEdge};

type Cost = u64;

/// Shapes and sizes to run
#[derive(Debug, Clone)]
struct BenchConfig {
    /// Node counts for the uniform graphs
    graph_sizes: Vec<usize>,
    /// Average number of edges per node in the uniform graphs
    edge_factor: usize,
    /// Largest edge weight
    max_weight: Cost,
    /// Node count for the dense and clustered graphs
    small_size: usize,
    /// Edge probability for the dense graph
    density: f64,
    seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            graph_sizes: vec![1_000, 10_000, 50_000, 100_000],
            edge_factor: 4,
            max_weight: 100,
            small_size: 1_000,
            density: 0.05,
            seed: DEFAULT_SEED,
        }
    }
}

// Times one algorithm on one graph
fn benchmark_algorithm<A>(
    algorithm: &A,
    graph: &DirectedGraph<WeightedEdge<Cost>>,
    source: usize,
) -> (Duration, ShortestPathResult<Cost>)
where
    A: ShortestPathAlgorithm<WeightedEdge<Cost>>,
{
    let start = Instant::now();
    let result = match algorithm.compute_shortest_paths(graph, source) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{} failed: {}", algorithm.name(), e);
            std::process::exit(1);
        }
    };
    let duration = start.elapsed();
    println!(
        "  - {:<24} reached {} vertices in {:?}",
        algorithm.name(),
        result.reachable_count(),
        duration
    );
    (duration, result)
}

// Runs all four algorithms on `graph`, checks they agree, and returns their timings
fn compare(label: &str, graph: &DirectedGraph<WeightedEdge<Cost>>) -> [Duration; 4] {
    println!(
        "\n{}: {} vertices, {} edges",
        label,
        graph.node_count(),
        graph.edge_count()
    );

    let source = 0;
    let (dial_time, dial) = benchmark_algorithm(&DialDijkstra::<Cost>::new(), graph, source);
    let (radix_time, radix) = benchmark_algorithm(&RadixDijkstra::<Cost>::new(), graph, source);
    let (queue_time, queue) = benchmark_algorithm(&QueueLabelCorrecting::new(), graph, source);
    let (deque_time, deque) = benchmark_algorithm(&DequeLabelCorrecting::new(), graph, source);

    let agree = dial.costs == radix.costs && dial.costs == queue.costs && dial.costs == deque.costs;
    if !agree {
        eprintln!("  ! cost vectors disagree on {}", label);
    }

    [dial_time, radix_time, queue_time, deque_time]
}

fn main() {
    env_logger::init();
    let config = BenchConfig::default();
    info!("benchmark configuration: {:?}", config);

    println!("=====================================================");
    println!("Benchmark: Dijkstra (dial, radix) vs label-correcting");
    println!("Edge factor: {} edges per vertex", config.edge_factor);
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &config.graph_sizes {
        let graph = random_weighted_graph(size, size * config.edge_factor, config.max_weight, config.seed);
        results.push((format!("uniform {}", size), compare("Uniform", &graph)));
    }

    let max_weight = config.max_weight;
    let dense = epsilon_dense(config.small_size, config.density, config.seed, |s, t, rng| {
        use rand::Rng;
        WeightedEdge::new(s, t, rng.gen_range(1..=max_weight))
    });
    results.push((format!("dense {}", config.small_size), compare("Epsilon-dense", &dense)));

    let clustered = clustered_2d(config.small_size, 8, 0.05, config.seed, |s, t, d| {
        WeightedEdge::new(s, t, 1 + (d * max_weight as f64) as Cost)
    });
    results.push((format!("clustered {}", config.small_size), compare("Clustered 2-D", &clustered)));

    println!("\n=====================================================");
    println!("Summary of Results (ms)");
    println!("=====================================================");
    println!(
        "{:<16} | {:<10} | {:<10} | {:<10} | {:<10}",
        "Graph", "Dial", "Radix", "Queue LC", "Deque LC"
    );
    println!("-----------------------------------------------------");

    for (label, times) in &results {
        println!(
            "{:<16} | {:<10} | {:<10} | {:<10} | {:<10}",
            label,
            times[0].as_millis(),
            times[1].as_millis(),
            times[2].as_millis(),
            times[3].as_millis()
        );
    }
}
