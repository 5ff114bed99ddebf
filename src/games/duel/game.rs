//! Duel orchestrator: the turn state machine.
//!
//! ## Turn structure
//!
//! Each player-turn runs `Start -> Main -> End`. The `Player` slot always
//! starts, and the turn counter increments whenever control returns to it.
//! The starting player's very first turn skips the draw. A game that
//! reaches `RulesConfig::max_turns` without a loser ends undetermined.
//!
//! ## Commands
//!
//! `player_play_card`, `player_declare_attack`, and `end_turn` are the
//! inbound commands. Each returns `Err(ActionError)` for a rule violation,
//! in which case the game is untouched. Successful commands push a fresh
//! `GameSnapshot` to the observer.
//!
//! ## Policy-driven slots
//!
//! A slot with an `OpponentPolicy` takes its turns through two pacing
//! suspensions (see `pacing`). With zero delays the game resumes them
//! itself, so a policy turn completes inside the command that started it.
//!
//! ## Example
//!
//! ```
//! use crystal_duel::core::{PlayerSlot, RulesConfig, TurnPhase};
//! use crystal_duel::games::duel::GameBuilder;
//! use crystal_duel::cards::TemplateId;
//!
//! let list: Vec<TemplateId> = ["crystal", "kaelen", "crystal", "golem", "crystal", "sylph"]
//!     .iter()
//!     .cycle()
//!     .take(30)
//!     .map(|&id| id.into())
//!     .collect();
//!
//! let mut game = GameBuilder::new()
//!     .rules(RulesConfig::default().headless())
//!     .seed(42)
//!     .build(&list, &list);
//!
//! game.start_game();
//! assert_eq!(game.turn(), 1);
//! assert_eq!(game.current_player(), PlayerSlot::Player);
//! assert_eq!(game.phase(), TurnPhase::Main);
//!
//! // The opponent's turn runs to completion inside `end_turn`.
//! game.end_turn().unwrap();
//! assert_eq!(game.turn(), 2);
//! assert_eq!(game.current_player(), PlayerSlot::Player);
//! ```

use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use super::pacing::{PendingStep, Suspension};
use super::player::{DrawOutcome, Player};
use super::policy::{HeuristicPolicy, OpponentPolicy};
use crate::cards::{Card, CardFactory, CardRegistry, TemplateId};
use crate::core::config::{RulesConfig, TurnPhase};
use crate::core::entity::InstanceId;
use crate::core::error::ActionError;
use crate::core::player::{PlayerMap, PlayerSlot};
use crate::core::rng::{GameRng, Shuffler};
use crate::core::state::GameSnapshot;
use crate::rules::{AttackTarget, DrawSkip, GameCommands, GameEvent, GameResult, NullObserver, StateObserver};
use crate::zones::Deck;

/// A two-player game.
pub struct Game<O: StateObserver = NullObserver> {
    rules: RulesConfig,
    players: PlayerMap<Player>,

    turn: u32,
    current: PlayerSlot,
    phase: TurnPhase,
    ended: bool,
    result: Option<GameResult>,
    finalized: bool,

    pending: Option<PendingStep>,
    policies: PlayerMap<Option<Box<dyn OpponentPolicy>>>,
    shuffler: Box<dyn Shuffler>,
    observer: O,
}

impl Game<NullObserver> {
    /// Game with default rules and collaborators: the reference card set, a
    /// seed-0 shuffler, and the heuristic policy on the `Opponent` slot.
    #[must_use]
    pub fn new(player_list: &[TemplateId], opponent_list: &[TemplateId]) -> Self {
        GameBuilder::new().build(player_list, opponent_list)
    }
}

impl<O: StateObserver> Game<O> {
    // === Turn state machine ===

    /// Start (or restart) the game.
    ///
    /// Both players gather their cards, shuffle, and draw their opening
    /// hands; the `Player` slot then takes turn 1.
    pub fn start_game(&mut self) {
        info!("starting game");
        self.turn = 0;
        self.phase = TurnPhase::Start;
        self.ended = false;
        self.result = None;
        self.finalized = false;
        self.pending = None;

        for (_, player) in self.players.iter_mut() {
            player.initialize(&mut *self.shuffler);
        }

        self.current = PlayerSlot::Player;
        self.emit(GameEvent::GameStarted { first: self.current });
        self.start_next_turn();
        self.run_immediate_steps();
    }

    /// Begin the current slot's turn.
    fn start_next_turn(&mut self) {
        if self.ended {
            return;
        }

        let slot = self.current;
        if slot == PlayerSlot::Player {
            if self.rules.max_turns.is_some_and(|max| self.turn >= max) {
                warn!(turn = self.turn, "turn limit reached, ending the game");
                self.ended = true;
                self.result = Some(GameResult::Undetermined);
                self.end_game();
                return;
            }
            self.turn += 1;
        }
        self.phase = TurnPhase::Start;
        debug!(turn = self.turn, %slot, "turn start");
        self.emit(GameEvent::TurnStarted { turn: self.turn, slot });

        let skip_draw = self.rules.first_player_skips_draw && self.turn == 1 && slot == PlayerSlot::Player;
        if skip_draw {
            self.players[slot].start_turn_without_draw();
            self.emit(GameEvent::DrawSkipped {
                slot,
                reason: DrawSkip::FirstTurn,
            });
        } else {
            let outcome = self.players[slot].start_turn();
            self.emit_draw(slot, outcome);
        }

        self.settle();
        self.phase = TurnPhase::Main;
        self.publish();

        if !self.ended && self.policies[slot].is_some() {
            self.pending = Some(PendingStep::thinking(slot, self.rules.pacing.thinking_delay));
        }
    }

    /// End the current turn and start the other slot's.
    ///
    /// Rejected while a policy-driven turn is suspended.
    pub fn end_turn(&mut self) -> Result<(), ActionError> {
        if self.ended {
            return Err(ActionError::GameEnded);
        }
        if self.pending.is_some() {
            return Err(ActionError::PolicyTurnInProgress);
        }
        self.finish_turn();
        self.run_immediate_steps();
        Ok(())
    }

    fn finish_turn(&mut self) {
        if self.ended {
            return;
        }

        let slot = self.current;
        self.phase = TurnPhase::End;
        self.players[slot].end_turn();
        self.emit(GameEvent::TurnEnded { turn: self.turn, slot });
        debug!(turn = self.turn, %slot, "turn end");

        if self.settle().is_some() {
            self.publish();
            return;
        }

        self.current = slot.other();
        self.start_next_turn();
    }

    // === Commands ===

    /// Gate shared by the main-phase commands.
    fn check_can_act(&self, slot: PlayerSlot) -> Result<(), ActionError> {
        if self.ended {
            return Err(ActionError::GameEnded);
        }
        if slot != self.current {
            return Err(ActionError::NotYourTurn(slot));
        }
        if self.pending.is_some() {
            return Err(ActionError::PolicyTurnInProgress);
        }
        Ok(())
    }

    /// Play a card from `slot`'s hand.
    pub fn player_play_card(&mut self, slot: PlayerSlot, card: InstanceId) -> Result<(), ActionError> {
        self.check_can_act(slot)?;

        let zone = self.players[slot].play_card(card)?;
        self.emit(GameEvent::CardPlayed { slot, card, zone });

        self.settle();
        self.publish();
        Ok(())
    }

    /// Attack with a unit on `slot`'s field.
    ///
    /// Validation: the attacker is a ready unit on the field; the target is
    /// the defending slot or a unit on its field; a direct attack is only
    /// legal against an empty field. The attack is registered before damage
    /// is dealt. There is no counter-damage.
    pub fn player_declare_attack(
        &mut self,
        slot: PlayerSlot,
        attacker: InstanceId,
        target: AttackTarget,
    ) -> Result<(), ActionError> {
        self.check_can_act(slot)?;
        let defender = slot.other();

        let damage = {
            let card = self.players[slot]
                .field_card(attacker)
                .ok_or(ActionError::AttackerNotFound(attacker))?;
            let unit = card.as_challenger().ok_or(ActionError::NotAUnit(attacker))?;
            if !unit.is_able_to_attack() {
                return Err(ActionError::AttackerNotReady(attacker));
            }
            unit.attack
        };

        // Any unit on the defending field blocks direct attacks.
        let blocked = self.players[defender].field().iter().any(Card::is_challenger);
        match target {
            AttackTarget::Player(target_slot) => {
                if target_slot != defender {
                    return Err(ActionError::InvalidTarget);
                }
                if blocked {
                    return Err(ActionError::MustAttackBlocker);
                }
            }
            AttackTarget::Unit(id) => {
                let is_unit = self.players[defender].field_card(id).is_some_and(Card::is_challenger);
                if !is_unit {
                    return Err(ActionError::InvalidTarget);
                }
            }
        }

        if let Some(unit) = self.players[slot].field_card_mut(attacker).and_then(Card::as_challenger_mut) {
            unit.register_attack();
        }
        debug!(%slot, %attacker, %target, damage, "attack");
        self.emit(GameEvent::AttackDeclared {
            slot,
            attacker,
            target,
            damage,
        });

        match target {
            AttackTarget::Player(target_slot) => {
                let player = &mut self.players[target_slot];
                player.take_damage(damage);
                let life = player.life();
                self.emit(GameEvent::PlayerDamaged {
                    slot: target_slot,
                    amount: damage,
                    life,
                });
            }
            AttackTarget::Unit(id) => {
                if let Some(card) = self.players[defender].field_card_mut(id) {
                    card.take_damage(damage);
                }
            }
        }

        self.check_deaths(defender);
        self.settle();
        self.publish();
        Ok(())
    }

    /// Death sweep over `slot`'s field. Returns the destroyed units.
    pub fn check_deaths(&mut self, slot: PlayerSlot) -> SmallVec<[InstanceId; 4]> {
        let destroyed = self.players[slot].sweep_dead();
        for &card in &destroyed {
            self.emit(GameEvent::UnitDestroyed { slot, card });
        }
        destroyed
    }

    // === Termination ===

    /// Evaluate the win condition, ending the game if it holds.
    ///
    /// A slot has lost if its `has_lost` flag is set or its life is zero or
    /// less; the `Player` slot is checked first. Once the game has ended the
    /// cached result is returned unchanged.
    pub fn check_win_condition(&mut self) -> Option<GameResult> {
        let already = self.finalized;
        let result = self.settle();
        if result.is_some() && !already {
            self.publish();
        }
        result
    }

    fn evaluate_win_condition(&mut self) -> Option<GameResult> {
        if self.ended {
            return self.result;
        }

        let loser = PlayerSlot::ALL.into_iter().find(|&slot| {
            let player = &self.players[slot];
            player.has_lost() || player.life() <= 0
        })?;

        let result = GameResult::Winner(loser.other());
        info!(%loser, %result, "win condition met");
        self.ended = true;
        self.result = Some(result);
        self.result
    }

    /// Check the win condition and finalize if the game just ended.
    fn settle(&mut self) -> Option<GameResult> {
        let result = self.evaluate_win_condition();
        if result.is_some() {
            self.finalize();
        }
        result
    }

    /// Terminal step. Acts once; later calls do nothing.
    fn finalize(&mut self) {
        if !self.ended {
            warn!("finalizing before a win condition, re-checking");
            if self.evaluate_win_condition().is_none() {
                error!("no winner could be determined, forcing the game to end");
                self.ended = true;
                self.result = Some(GameResult::Undetermined);
            }
        }
        if self.finalized {
            return;
        }
        self.finalized = true;
        self.pending = None;

        let result = self.result.unwrap_or(GameResult::Undetermined);
        info!(%result, turn = self.turn, "game over");
        self.emit(GameEvent::GameEnded { result });
    }

    /// End the game now.
    ///
    /// Uses the win condition if one holds, otherwise the game ends with
    /// `GameResult::Undetermined`. Idempotent.
    pub fn end_game(&mut self) {
        let already = self.finalized;
        self.finalize();
        if !already {
            self.publish();
        }
    }

    // === Pacing ===

    /// The suspension waiting to be resumed, if any.
    #[must_use]
    pub fn pending_step(&self) -> Option<PendingStep> {
        self.pending
    }

    /// Resume the pending suspension.
    ///
    /// The caller is expected to have waited out its delay. Any immediate
    /// steps that follow are run as well. Returns the suspension resumed.
    pub fn resume(&mut self) -> Result<Suspension, ActionError> {
        let step = self.pending.take().ok_or(ActionError::NothingPending)?;
        self.run_step(step);
        self.run_immediate_steps();
        Ok(step.suspension)
    }

    /// Resume suspensions until none is pending, ignoring delays.
    ///
    /// Returns the number of suspensions resumed.
    pub fn resume_all(&mut self) -> usize {
        let mut resumed = 0;
        while self.resume().is_ok() {
            resumed += 1;
        }
        resumed
    }

    fn run_immediate_steps(&mut self) {
        while let Some(step) = self.pending {
            if !step.is_immediate() {
                break;
            }
            self.pending = None;
            self.run_step(step);
        }
    }

    fn run_step(&mut self, step: PendingStep) {
        if self.ended || self.current != step.slot {
            debug!(?step, "dropping stale step");
            return;
        }

        match step.suspension {
            Suspension::OpponentThinking => {
                self.run_policy(step.slot);
                if !self.ended && self.current == step.slot {
                    self.pending = Some(PendingStep::turn_complete(step.slot, self.rules.pacing.end_turn_delay));
                }
            }
            Suspension::OpponentTurnComplete => self.finish_turn(),
        }
    }

    fn run_policy(&mut self, slot: PlayerSlot) {
        let Some(mut policy) = self.policies[slot].take() else {
            return;
        };
        debug!(%slot, policy = policy.name(), "policy turn");
        policy.play_turn(self, slot);
        self.policies[slot] = Some(policy);
    }

    // === Observation ===

    fn emit(&mut self, event: GameEvent) {
        self.observer.on_event(&event);
    }

    fn emit_draw(&mut self, slot: PlayerSlot, outcome: DrawOutcome) {
        let event = match outcome {
            DrawOutcome::Drawn(card) => GameEvent::CardDrawn { slot, card },
            DrawOutcome::HandFull => GameEvent::DrawSkipped {
                slot,
                reason: DrawSkip::HandFull,
            },
            DrawOutcome::Decked => GameEvent::PlayerDecked { slot },
            DrawOutcome::AlreadyLost => return,
        };
        self.emit(event);
    }

    fn publish(&mut self) {
        if self.observer.wants_snapshots() {
            let snapshot = self.snapshot();
            self.observer.on_state(&snapshot);
        }
    }

    /// Full observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            turn: self.turn,
            current_player: self.current,
            phase: self.phase,
            ended: self.ended,
            result: self.result,
            players: self.players.clone(),
        }
    }

    /// Replace the game state with a snapshot.
    ///
    /// Rules, policies, and collaborators are kept. A snapshot in which a
    /// player has already lost ends the game on restore. If the restored
    /// turn belongs to a policy-driven slot in its main phase, the policy
    /// acts again from the start of its checklist.
    pub fn restore(&mut self, snapshot: GameSnapshot) {
        let GameSnapshot {
            turn,
            current_player,
            phase,
            ended,
            result,
            players,
        } = snapshot;

        self.turn = turn;
        self.current = current_player;
        self.phase = phase;
        self.players = players;
        self.ended = ended;
        self.result = if ended {
            Some(result.unwrap_or(GameResult::Undetermined))
        } else {
            None
        };
        self.finalized = ended;
        self.pending = None;
        debug!(turn, current = %current_player, ended, "state restored");

        if self.settle().is_some() {
            self.publish();
            return;
        }
        if phase == TurnPhase::Main && self.policies[current_player].is_some() {
            self.pending = Some(PendingStep::thinking(current_player, self.rules.pacing.thinking_delay));
        }

        self.publish();
        self.run_immediate_steps();
    }

    // === Queries ===

    #[must_use]
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerSlot {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Set once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerSlot> {
        self.result.and_then(|r| r.winner())
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Whether `slot` is driven by a policy.
    #[must_use]
    pub fn is_policy_driven(&self, slot: PlayerSlot) -> bool {
        self.policies[slot].is_some()
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the game, keeping the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }
}

impl<O: StateObserver> GameCommands for Game<O> {
    fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot]
    }

    fn current_player(&self) -> PlayerSlot {
        self.current
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn play_card(&mut self, slot: PlayerSlot, card: InstanceId) -> Result<(), ActionError> {
        self.player_play_card(slot, card)
    }

    fn declare_attack(
        &mut self,
        slot: PlayerSlot,
        attacker: InstanceId,
        target: AttackTarget,
    ) -> Result<(), ActionError> {
        self.player_declare_attack(slot, attacker, target)
    }
}

impl<O: StateObserver> std::fmt::Debug for Game<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("turn", &self.turn)
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("ended", &self.ended)
            .field("result", &self.result)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// Builder for a `Game`.
pub struct GameBuilder<O: StateObserver = NullObserver> {
    rules: RulesConfig,
    seed: u64,
    factory: Option<Box<dyn CardFactory>>,
    shuffler: Option<Box<dyn Shuffler>>,
    policies: PlayerMap<Option<Box<dyn OpponentPolicy>>>,
    observer: O,
}

impl Default for GameBuilder<NullObserver> {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            seed: 0,
            factory: None,
            shuffler: None,
            policies: PlayerMap::new(|slot| match slot {
                PlayerSlot::Player => None,
                PlayerSlot::Opponent => Some(Box::new(HeuristicPolicy) as Box<dyn OpponentPolicy>),
            }),
            observer: NullObserver,
        }
    }
}

impl GameBuilder<NullObserver> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: StateObserver> GameBuilder<O> {
    #[must_use]
    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Seed for the default shuffler.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Card factory used to build both decks. Defaults to the reference set.
    #[must_use]
    pub fn factory(mut self, factory: impl CardFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Shuffler used for every deck shuffle. Defaults to `GameRng`.
    #[must_use]
    pub fn shuffler(mut self, shuffler: impl Shuffler + 'static) -> Self {
        self.shuffler = Some(Box::new(shuffler));
        self
    }

    /// Drive `slot` with a policy.
    #[must_use]
    pub fn policy(mut self, slot: PlayerSlot, policy: impl OpponentPolicy + 'static) -> Self {
        self.policies[slot] = Some(Box::new(policy));
        self
    }

    /// Leave `slot` to outside commands.
    #[must_use]
    pub fn human(mut self, slot: PlayerSlot) -> Self {
        self.policies[slot] = None;
        self
    }

    /// Set the state observer.
    #[must_use]
    pub fn observer<P: StateObserver>(self, observer: P) -> GameBuilder<P> {
        GameBuilder {
            rules: self.rules,
            seed: self.seed,
            factory: self.factory,
            shuffler: self.shuffler,
            policies: self.policies,
            observer,
        }
    }

    /// Build the game from two deck lists (bottom card first).
    ///
    /// Unknown template ids are skipped. The game is not started.
    pub fn build(self, player_list: &[TemplateId], opponent_list: &[TemplateId]) -> Game<O> {
        let mut factory = self.factory.unwrap_or_else(|| Box::new(CardRegistry::standard()));
        let rules = self.rules;

        let players = PlayerMap::new(|slot| {
            let list = match slot {
                PlayerSlot::Player => player_list,
                PlayerSlot::Opponent => opponent_list,
            };
            let deck = Deck::build(list, &mut *factory);
            Player::new(slot, slot.default_name(), deck, &rules)
        });

        let shuffler = self
            .shuffler
            .unwrap_or_else(|| Box::new(GameRng::new(self.seed)));

        Game {
            rules,
            players,
            turn: 0,
            current: PlayerSlot::Player,
            phase: TurnPhase::Start,
            ended: false,
            result: None,
            finalized: false,
            pending: None,
            policies: self.policies,
            shuffler,
            observer: self.observer,
        }
    }
}
