use crate::solver::{
    Color, Constraints, Dictionary, Engine, FeedbackId, GameStatus, Objective, PruneIndex,
    Recommendation, SolverError, Word,
};

#[derive(Clone, Copy, Debug)]
pub struct Turn {
    pub guess: Word,
    pub fid: FeedbackId,
}

/// One assisted game: the dictionary carries the feedback applied so far as
/// its mask stack, the engine searches ahead over the prune index, and the
/// turn history drives undo and the board display.
pub struct Session {
    dictionary: Dictionary,
    index: PruneIndex,
    engine: Engine,
    turns: Vec<Turn>,
}

impl Session {
    pub fn new(words: Vec<Word>, index: PruneIndex, objective: Objective) -> Session {
        assert_eq!(words.len(), index.size(), "index built for another wordlist");
        Session {
            dictionary: Dictionary::new(words),
            index,
            engine: Engine::new(objective),
            turns: Vec::new(),
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn_number(&self) -> usize {
        self.turns.len() + 1
    }

    pub fn live_count(&self) -> usize {
        self.dictionary.live_count()
    }

    pub fn objective(&self) -> Objective {
        self.engine.objective()
    }

    /// Words still consistent with every applied turn, in wordlist order.
    pub fn candidates(&self) -> Vec<Word> {
        let words = self.dictionary.words();
        self.dictionary
            .mask()
            .zeros()
            .map(|i| words[i])
            .collect()
    }

    /// The engine's best guess for the current state, or `None` when no
    /// candidate is left to recommend.
    pub fn recommend(&mut self) -> Option<(Word, Recommendation)> {
        if self.dictionary.live_count() == 0 {
            return None;
        }
        let rec = self.engine.solve(&self.index, self.dictionary.mask());
        Some((self.dictionary.words()[rec.guess], rec))
    }

    /// Apply one observed feedback. The guess may be any valid five-letter
    /// word, in or out of the wordlist: the pruning predicate only needs
    /// the constraints, not an index entry.
    ///
    /// Feedback that empties the candidate set leaves the session unchanged
    /// and reports [`SolverError::InconsistentFeedback`].
    pub fn apply_turn(
        &mut self,
        guess: Word,
        colors: [Color; 5],
    ) -> Result<GameStatus, SolverError> {
        let fid = FeedbackId::from_colors(guess, colors);
        let constraints = Constraints::from_feedback(fid);

        let live = self.dictionary.prune(&constraints).count_zeros();
        if live == 0 {
            self.dictionary.pop();
            return Err(SolverError::InconsistentFeedback);
        }

        self.turns.push(Turn { guess, fid });
        Ok(if fid.is_all_green() {
            GameStatus::Won
        } else {
            GameStatus::Ongoing
        })
    }

    /// Revert the most recent accepted turn. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.turns.pop().is_none() {
            return false;
        }
        self.dictionary.pop();
        true
    }
}
