use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    #[default]
    SelectingDifficulty,
    Playing,
    Won,
    Lost,
    Finished,
}

impl ControllerState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::Finished)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    /// Ran out of moves.
    Lost,
    /// Declined to continue after a win.
    Stopped,
    /// Won the last stage there is.
    Completed,
    /// The input ran dry mid-session.
    Abandoned,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub end: SessionEnd,
    pub stages_won: usize,
    pub last_stage: Option<Stage>,
}

/// Source of player decisions. Returning `None` ends the session as [`SessionEnd::Abandoned`].
pub trait PlayerInput {
    fn select_stage(&mut self) -> Option<Stage>;

    /// Raw move key, parsed with [`Direction::from_symbol`].
    fn next_move(&mut self) -> Option<char>;

    fn continue_after_win(&mut self) -> bool;
}

/// What the controller asks its renderer to show, in order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SessionEvent<'a> {
    /// The arrangement to reach, shown before play starts.
    Goal {
        stage: Option<Stage>,
        grid: &'a Grid,
    },
    Board {
        grid: &'a Grid,
        moves_left: MoveCount,
    },
    /// A move that was refused; the game is unchanged.
    Rejected(GameError),
    Won {
        moves_left: MoveCount,
        moves_made: MoveCount,
    },
    Lost {
        moves_made: MoveCount,
    },
    Advanced(Stage),
    Completed,
}

pub trait Renderer {
    fn render(&mut self, event: SessionEvent<'_>);
}

/// Owns the grid and move budget for a play session and walks it through stage selection, play and the end of
/// each stage.
#[derive(Clone, Debug)]
pub struct GameController<S> {
    shuffler: S,
    state: ControllerState,
    stage: Option<Stage>,
    pending_stage: Option<Stage>,
    grid: Option<Grid>,
    moves_left: MoveCount,
    moves_made: MoveCount,
    stages_won: usize,
    end: Option<SessionEnd>,
}

impl<S: GridShuffler> GameController<S> {
    pub fn new(shuffler: S) -> Self {
        Self {
            shuffler,
            state: Default::default(),
            stage: None,
            pending_stage: None,
            grid: None,
            moves_left: 0,
            moves_made: 0,
            stages_won: 0,
            end: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Stage chosen by the last [`Self::resolve_win`], waiting to be started.
    pub fn pending_stage(&self) -> Option<Stage> {
        self.pending_stage
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn moves_left(&self) -> MoveCount {
        self.moves_left
    }

    pub fn moves_made(&self) -> MoveCount {
        self.moves_made
    }

    pub fn stages_won(&self) -> usize {
        self.stages_won
    }

    pub fn shuffler(&self) -> &S {
        &self.shuffler
    }

    /// Starts `stage`: a fresh solved grid is shuffled and the budget set from the level. Returns the solved grid.
    pub fn begin(&mut self, stage: Stage) -> Result<Grid> {
        self.start(Some(stage), stage.config())
    }

    /// Starts a one-off puzzle outside the stage progression.
    pub fn begin_custom(&mut self, config: PuzzleConfig) -> Result<Grid> {
        self.start(None, config)
    }

    fn start(&mut self, stage: Option<Stage>, config: PuzzleConfig) -> Result<Grid> {
        self.check_state(ControllerState::SelectingDifficulty)?;
        if config.move_budget == 0 {
            return Err(GameError::EmptyMoveBudget);
        }

        let goal = Grid::solved(config.size)?;
        let grid = self.shuffler.shuffle(&goal)?;

        log::debug!(
            "Starting {stage:?}: {size}x{size} grid, {budget} moves",
            size = config.size,
            budget = config.move_budget
        );
        self.stage = stage;
        self.pending_stage = None;
        self.grid = Some(grid);
        self.moves_left = config.move_budget;
        self.moves_made = 0;
        self.state = ControllerState::Playing;
        Ok(goal)
    }

    /// Applies one move. A refused move costs nothing and leaves everything as it was.
    pub fn play(&mut self, direction: Direction) -> Result<MoveOutcome> {
        self.check_state(ControllerState::Playing)?;
        let grid = self
            .grid
            .as_mut()
            .ok_or(GameError::InvalidTransition(self.state))?;

        apply_move(grid, direction)?;
        self.moves_left = self.moves_left.saturating_sub(1);
        self.moves_made = self.moves_made.saturating_add(1);

        let outcome = if is_solved(grid) {
            self.stages_won += 1;
            self.state = ControllerState::Won;
            MoveOutcome::Won
        } else if self.moves_left == 0 {
            self.state = ControllerState::Lost;
            self.end = Some(SessionEnd::Lost);
            MoveOutcome::Lost
        } else {
            MoveOutcome::Moved
        };

        if outcome.is_finished() {
            log::debug!("Stage {:?} ended: {outcome:?} after {} moves", self.stage, self.moves_made);
        }
        Ok(outcome)
    }

    pub fn play_symbol(&mut self, symbol: char) -> Result<MoveOutcome> {
        self.check_state(ControllerState::Playing)?;
        self.play(Direction::from_symbol(symbol)?)
    }

    /// Settles a won stage. Continuing moves on to the next stage when there is one, returning it; otherwise the
    /// session is over.
    pub fn resolve_win(&mut self, keep_playing: bool) -> Result<Option<Stage>> {
        self.check_state(ControllerState::Won)?;

        let next = self.stage.and_then(Stage::next);
        match (keep_playing, next) {
            (true, Some(next)) => {
                log::debug!("Advancing to {next:?}");
                self.pending_stage = Some(next);
                self.state = ControllerState::SelectingDifficulty;
                Ok(Some(next))
            }
            (true, None) => {
                self.finish(SessionEnd::Completed);
                Ok(None)
            }
            (false, _) => {
                self.finish(SessionEnd::Stopped);
                Ok(None)
            }
        }
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        Some(SessionSummary {
            end: self.end?,
            stages_won: self.stages_won,
            last_stage: self.stage,
        })
    }

    /// Drives the whole session against the given collaborators until it ends.
    ///
    /// Refused moves are reported to the renderer and the player is asked again; any other error is fatal and
    /// returned.
    pub fn run<I, R>(&mut self, input: &mut I, renderer: &mut R) -> Result<SessionSummary>
    where
        I: PlayerInput + ?Sized,
        R: Renderer + ?Sized,
    {
        use ControllerState::*;

        loop {
            match self.state {
                SelectingDifficulty => {
                    let Some(stage) = self.pending_stage.or_else(|| input.select_stage()) else {
                        self.finish(SessionEnd::Abandoned);
                        continue;
                    };
                    let goal = self.begin(stage)?;
                    renderer.render(SessionEvent::Goal {
                        stage: Some(stage),
                        grid: &goal,
                    });
                    self.render_board(renderer);
                }
                Playing => {
                    let Some(symbol) = input.next_move() else {
                        self.finish(SessionEnd::Abandoned);
                        continue;
                    };
                    match self.play_symbol(symbol) {
                        Ok(outcome) => {
                            self.render_board(renderer);
                            match outcome {
                                MoveOutcome::Moved => {}
                                MoveOutcome::Won => renderer.render(SessionEvent::Won {
                                    moves_left: self.moves_left,
                                    moves_made: self.moves_made,
                                }),
                                MoveOutcome::Lost => renderer.render(SessionEvent::Lost {
                                    moves_made: self.moves_made,
                                }),
                            }
                        }
                        Err(err) if err.is_recoverable() => {
                            log::debug!("Rejected move {symbol:?}: {err}");
                            renderer.render(SessionEvent::Rejected(err));
                        }
                        Err(err) => return Err(err),
                    }
                }
                Won => match self.resolve_win(input.continue_after_win())? {
                    Some(next) => renderer.render(SessionEvent::Advanced(next)),
                    None if self.end == Some(SessionEnd::Completed) => {
                        renderer.render(SessionEvent::Completed)
                    }
                    None => {}
                },
                Lost | Finished => {
                    return self
                        .summary()
                        .ok_or(GameError::InvalidTransition(self.state));
                }
            }
        }
    }

    fn render_board<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if let Some(grid) = &self.grid {
            renderer.render(SessionEvent::Board {
                grid,
                moves_left: self.moves_left,
            });
        }
    }

    fn finish(&mut self, end: SessionEnd) {
        log::debug!("Session over: {end:?}, {} stages won", self.stages_won);
        self.end = Some(end);
        self.state = ControllerState::Finished;
    }

    fn check_state(&self, expected: ControllerState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GameError::InvalidTransition(self.state))
        }
    }
}
