use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use rayon::prelude::*;

use super::bit_set::{BitSet, BLOCK_BITS};
use super::oracle::feedback_id;
use super::types::{FeedbackId, SolverError, Word};

/// Precomputed feedback ids and prune masks for every (guess, solution)
/// pair of one wordlist.
///
/// The grid holds the feedback id for each ordered pair; the prune map
/// holds, per distinct id, the bitset of words inconsistent with that
/// feedback. The index is deliberately move-only: the grid alone is
/// |W|^2 * 8 bytes.
#[derive(Debug)]
pub struct PruneIndex {
    size: usize,
    grid: Vec<u64>,
    prune_map: HashMap<u64, BitSet>,
}

impl PruneIndex {
    /// Build the full index from a wordlist. Quadratic in |W|; the grid
    /// rows are computed in parallel.
    pub fn build(words: &[Word]) -> PruneIndex {
        let grid = build_grid(words);
        let prune_map = build_prune_map(&grid, words.len());
        log::debug!(
            "prune index built: {} words, {} distinct feedback ids",
            words.len(),
            prune_map.len()
        );
        PruneIndex {
            size: words.len(),
            grid,
            prune_map,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct feedback ids across the whole grid.
    pub fn distinct_feedbacks(&self) -> usize {
        self.prune_map.len()
    }

    /// Feedback id for guess index g against solution index s.
    /// Out-of-range indices are a programming error.
    pub fn feedback(&self, g: usize, s: usize) -> FeedbackId {
        assert!(g < self.size && s < self.size, "word index out of range");
        FeedbackId(self.grid[g * self.size + s])
    }

    /// The prune mask for one feedback id, when the index has seen it.
    pub fn prune_mask(&self, fid: FeedbackId) -> Result<&BitSet, SolverError> {
        self.prune_map
            .get(&fid.raw())
            .ok_or(SolverError::MissingFeedback(fid))
    }

    /// The prune mask for an in-grid pair. Every grid id has an entry, so
    /// this cannot miss for valid indices.
    pub fn prune_pair(&self, g: usize, s: usize) -> &BitSet {
        let fid = self.feedback(g, s);
        self.prune_map
            .get(&fid.raw())
            .expect("grid feedback id missing from prune map")
    }

    /// State transition for one observed feedback: the previous mask plus
    /// everything the feedback rules out.
    pub fn apply(&self, pruned: &BitSet, fid: FeedbackId) -> Result<BitSet, SolverError> {
        let mask = self.prune_mask(fid)?;
        let mut next = pruned.clone();
        next.union_with(mask);
        Ok(next)
    }

    /// Serialize the prune map (the grid is cheap to recompute):
    ///
    /// ```text
    /// u64                  keyset_size
    /// keyset_size times:
    ///   u64                feedback id
    ///   ceil(|W|/64)*u64   prune bitset blocks, low bit first
    /// ```
    ///
    /// All integers little-endian.
    pub fn save<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&(self.prune_map.len() as u64).to_le_bytes())?;
        for (fid, bits) in &self.prune_map {
            w.write_all(&fid.to_le_bytes())?;
            for block in bits.blocks() {
                w.write_all(&block.to_le_bytes())?;
            }
        }
        Ok(())
    }

    /// Reload an index saved by [`PruneIndex::save`], recomputing the grid
    /// from `words` and validating the file against it.
    pub fn load<R: Read>(r: &mut R, words: &[Word]) -> Result<PruneIndex, SolverError> {
        let size = words.len();
        let grid = build_grid(words);
        let expected: HashSet<u64> = grid.iter().copied().collect();
        let blocks_per_set = size.div_ceil(BLOCK_BITS);

        let keyset_size = read_u64(r)? as usize;
        if keyset_size != expected.len() {
            return Err(SolverError::CorruptIndex(format!(
                "keyset size {} does not match the wordlist's {} distinct feedbacks",
                keyset_size,
                expected.len()
            )));
        }

        let mut prune_map = HashMap::with_capacity(keyset_size);
        for _ in 0..keyset_size {
            let fid = read_u64(r)?;
            if !expected.contains(&fid) {
                return Err(SolverError::CorruptIndex(format!(
                    "feedback id {fid:#x} does not occur for this wordlist"
                )));
            }

            let mut blocks = Vec::with_capacity(blocks_per_set);
            for _ in 0..blocks_per_set {
                blocks.push(read_u64(r)?);
            }
            let bits = BitSet::from_blocks(blocks, size).ok_or_else(|| {
                SolverError::CorruptIndex("prune bitset does not match wordlist size".into())
            })?;

            if prune_map.insert(fid, bits).is_some() {
                return Err(SolverError::CorruptIndex(format!(
                    "duplicate feedback id {fid:#x}"
                )));
            }
        }

        // The declared keyset must also exhaust the file.
        let mut probe = [0u8; 1];
        if r.read(&mut probe)? != 0 {
            return Err(SolverError::CorruptIndex(
                "trailing data after last prune entry".into(),
            ));
        }

        log::debug!("prune index loaded: {size} words, {keyset_size} feedback ids");
        Ok(PruneIndex {
            size,
            grid,
            prune_map,
        })
    }

    /// Load `path` when it exists, otherwise build the index and persist it
    /// there. A present-but-invalid file is an error, not a rebuild.
    pub fn load_or_build(path: &Path, words: &[Word]) -> Result<PruneIndex, SolverError> {
        if path.exists() {
            let mut reader = BufReader::new(File::open(path)?);
            return PruneIndex::load(&mut reader, words);
        }

        let index = PruneIndex::build(words);
        let mut writer = BufWriter::new(File::create(path)?);
        index.save(&mut writer)?;
        writer.flush()?;
        log::info!("prune index written to {}", path.display());
        Ok(index)
    }
}

fn build_grid(words: &[Word]) -> Vec<u64> {
    let n = words.len();
    let mut grid = vec![0u64; n * n];
    grid.par_chunks_mut(n)
        .enumerate()
        .for_each(|(g_idx, row)| {
            let guess = &words[g_idx];
            for (s_idx, solution) in words.iter().enumerate() {
                row[s_idx] = feedback_id(guess, solution).raw();
            }
        });
    grid
}

fn build_prune_map(grid: &[u64], n: usize) -> HashMap<u64, BitSet> {
    let mut map: HashMap<u64, BitSet> = HashMap::new();

    for g in 0..n {
        let row = &grid[g * n..(g + 1) * n];
        for &fid in row {
            if map.contains_key(&fid) {
                continue;
            }
            // The words surviving this feedback are exactly the solutions
            // producing the same id under this guess; everything else is
            // marked pruned.
            let mut bits = BitSet::new(n);
            for (k, &other) in row.iter().enumerate() {
                if other != fid {
                    bits.set(k);
                }
            }
            map.insert(fid, bits);
        }
    }

    map
}

fn read_u64<R: Read>(r: &mut R) -> Result<u64, SolverError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            SolverError::CorruptIndex("file truncated".into())
        } else {
            SolverError::Io(e)
        }
    })?;
    Ok(u64::from_le_bytes(buf))
}
