//! Parallel chunk data generation.
//!
//! Chunk data has no cross-chunk dependency, so the generation phase fans the
//! requested coordinates out over a pool of scoped worker threads fed through
//! a `crossbeam-channel`. Results are slotted back by request index, so the
//! output order (and content) never depends on the thread count.

use std::time::Instant;

use crossbeam_channel::bounded;
use homestead_voxel::{ChunkCoord, ChunkData};
use tracing::{debug, trace, warn};

use crate::error::TerrainError;
use crate::generator::TerrainGenerator;

/// A finished chunk travelling back from a worker.
struct GeneratedChunk {
    /// Position of the request in the caller's coordinate list.
    index: usize,
    data: ChunkData,
    generation_time_us: u64,
}

/// Worker count used when the caller asks for `0` threads.
pub fn default_thread_count() -> usize {
    num_cpus::get().max(1)
}

/// Generates the chunks at `coords`, in order, using up to `threads` workers.
///
/// `threads == 0` uses every available core. A single worker (or a single
/// chunk) runs inline on the calling thread.
///
/// # Errors
///
/// Returns [`TerrainError::WorkerSpawn`] if a worker thread cannot be started
/// and [`TerrainError::Incomplete`] if workers exit without delivering every
/// chunk.
pub fn generate_chunks(
    generator: &TerrainGenerator,
    coords: &[ChunkCoord],
    threads: usize,
) -> Result<Vec<ChunkData>, TerrainError> {
    if coords.is_empty() {
        return Ok(Vec::new());
    }

    let requested = if threads == 0 {
        default_thread_count()
    } else {
        threads
    };
    let workers = requested.min(coords.len());
    if threads != 0 && workers < requested {
        warn!(requested, workers, "more generation workers than chunks; clamping");
    }

    let start = Instant::now();
    if workers == 1 {
        let chunks: Vec<ChunkData> = coords.iter().map(|&c| generator.generate(c)).collect();
        debug!(
            chunks = chunks.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generated chunk data inline"
        );
        return Ok(chunks);
    }

    // Both channels hold every item, so neither side ever blocks on capacity.
    let (task_tx, task_rx) = bounded::<(usize, ChunkCoord)>(coords.len());
    let (result_tx, result_rx) = bounded::<GeneratedChunk>(coords.len());
    for task in coords.iter().copied().enumerate() {
        if task_tx.send(task).is_err() {
            break;
        }
    }
    drop(task_tx);

    std::thread::scope(|scope| -> Result<(), TerrainError> {
        for worker in 0..workers {
            let tasks = task_rx.clone();
            let results = result_tx.clone();
            std::thread::Builder::new()
                .name(format!("chunk-gen-{worker}"))
                .spawn_scoped(scope, move || {
                    while let Ok((index, coord)) = tasks.recv() {
                        let begun = Instant::now();
                        let data = generator.generate(coord);
                        let generation_time_us = begun.elapsed().as_micros() as u64;
                        trace!(%coord, generation_time_us, "chunk generated");
                        let done = GeneratedChunk {
                            index,
                            data,
                            generation_time_us,
                        };
                        if results.send(done).is_err() {
                            break;
                        }
                    }
                })
                .map_err(TerrainError::WorkerSpawn)?;
        }
        Ok(())
    })?;
    drop(result_tx);

    let mut slots: Vec<Option<ChunkData>> = vec![None; coords.len()];
    let mut busy_us = 0u64;
    for done in result_rx.iter() {
        busy_us += done.generation_time_us;
        slots[done.index] = Some(done.data);
    }

    let missing = slots.iter().filter(|s| s.is_none()).count();
    if missing > 0 {
        return Err(TerrainError::Incomplete { missing });
    }

    debug!(
        chunks = coords.len(),
        workers,
        busy_ms = busy_us / 1_000,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "generated chunk data in parallel"
    );
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Biome;
    use homestead_voxel::WorldSize;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(2024, Biome::Mountains, WorldSize::new(4, 4))
    }

    #[test]
    fn test_empty_request_returns_empty() {
        assert!(generate_chunks(&generator(), &[], 4).unwrap().is_empty());
    }

    #[test]
    fn test_output_order_matches_request_order() {
        let coords: Vec<_> = WorldSize::new(4, 4).coords().collect();
        let chunks = generate_chunks(&generator(), &coords, 3).unwrap();
        let got: Vec<_> = chunks.iter().map(|c| c.coord()).collect();
        assert_eq!(got, coords);
    }

    #[test]
    fn test_thread_count_does_not_change_content() {
        let generator = generator();
        let coords: Vec<_> = WorldSize::new(3, 2).coords().collect();
        let serial = generate_chunks(&generator, &coords, 1).unwrap();
        let parallel = generate_chunks(&generator, &coords, 4).unwrap();
        let auto = generate_chunks(&generator, &coords, 0).unwrap();
        assert_eq!(serial, parallel);
        assert_eq!(serial, auto);
    }

    #[test]
    fn test_matches_direct_generation() {
        let generator = generator();
        let coord = ChunkCoord::new(1, 2);
        let chunks = generate_chunks(&generator, &[coord, ChunkCoord::new(0, 0)], 2).unwrap();
        assert_eq!(chunks[0], generator.generate(coord));
    }
}
