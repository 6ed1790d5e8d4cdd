//! Example game-side consumer of the logger
//!
//! The controller receives its [`Logger`] at construction and never touches
//! the process default. Movement is a single axis; physics is out of scope.

use framewatch_core::Logger;

const TAG: &str = "PlayerController";

/// Speed above which a collision is worth a log line
const HARD_COLLISION_SPEED: f64 = 5.0;

/// Tunables set at spawn
#[derive(Debug, Clone, Copy)]
pub struct PlayerSettings {
    pub move_speed: f64,
    pub jump_force: f64,
    pub health: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 10.0,
            health: 100.0,
        }
    }
}

/// Input sampled by the host for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub horizontal: f64,
    pub jump_pressed: bool,
}

/// What the player touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    Enemy,
    PowerUp,
    SafeZone,
    Other(String),
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enemy => write!(f, "Enemy"),
            Self::PowerUp => write!(f, "PowerUp"),
            Self::SafeZone => write!(f, "SafeZone"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug)]
pub struct PlayerController {
    logger: Logger,
    settings: PlayerSettings,
    health: f64,
    last_health: f64,
    grounded: bool,
    horizontal: f64,
    position: f64,
    alive: bool,
}

impl PlayerController {
    pub fn new(logger: Logger, settings: PlayerSettings) -> Self {
        logger.log(
            TAG,
            format!(
                "PlayerController initialized with health: {}",
                settings.health
            ),
        );
        Self {
            logger,
            settings,
            health: settings.health,
            last_health: settings.health,
            grounded: true,
            horizontal: 0.0,
            position: 0.0,
            alive: true,
        }
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Per-frame input handling
    pub fn update(&mut self, input: PlayerInput) {
        self.horizontal = input.horizontal;

        if input.jump_pressed {
            self.logger.log(TAG, "Jump input detected");
            self.jump();
        }

        let horizontal = self.horizontal;
        self.logger.log_if(horizontal != 0.0, TAG, || {
            format!("Horizontal input: {:.2}", horizontal)
        });

        self.check_health_change();
    }

    /// Fixed-step movement
    pub fn fixed_update(&mut self, step_secs: f64) {
        self.position += self.horizontal * self.settings.move_speed * step_secs;
    }

    pub fn jump(&mut self) {
        if self.grounded {
            self.logger.log(
                TAG,
                format!("Jumping with force: {}", self.settings.jump_force),
            );
            self.grounded = false;
        } else {
            self.logger.log_warning(TAG, "Attempted to jump while not grounded");
        }
    }

    pub fn land(&mut self) {
        self.grounded = true;
    }

    pub fn take_damage(&mut self, damage: f64) {
        self.health -= damage;
        self.logger.log_warning(
            TAG,
            format!("Player took {} damage. Health: {}", damage, self.health),
        );

        if self.health <= 0.0 && self.alive {
            self.logger.log_error(TAG, "Player died!");
            self.on_player_died();
        }
    }

    fn on_player_died(&mut self) {
        self.logger.log_error(TAG, "Player death event triggered");
        self.alive = false;
    }

    /// Emit one record through every facade entry point
    pub fn run_diagnostics(&self) {
        self.logger.log(TAG, "Test log message");
        self.logger.log_warning(TAG, "Test warning message");
        self.logger.log_error(TAG, "Test error message");

        let err = std::io::Error::new(
            std::io::ErrorKind::Other,
            "Test exception for debugging",
        );
        self.logger.log_exception(TAG, &err);

        let health = self.health;
        self.logger.log_if(true, TAG, || "This should appear".into());
        self.logger.log_if(false, TAG, || "This should NOT appear".into());
        self.logger.log_warning_if(health < 50.0, TAG, || "Health is low!".into());
        self.logger.log_error_if(health <= 0.0, TAG, || "Player is dead!".into());
    }

    pub fn set_move_speed(&mut self, speed: f64) {
        self.logger.log(
            TAG,
            format!(
                "Move speed changed from {} to {}",
                self.settings.move_speed, speed
            ),
        );
        self.settings.move_speed = speed;
    }

    pub fn on_trigger_enter(&mut self, kind: &TriggerKind) {
        self.logger.log(TAG, format!("Trigger entered with: {}", kind));

        match kind {
            TriggerKind::Enemy => {
                self.logger.log_warning(TAG, "Player hit enemy!");
                self.take_damage(10.0);
            }
            TriggerKind::PowerUp => {
                self.logger.log(TAG, "Player collected power-up!");
            }
            _ => {}
        }
    }

    pub fn on_trigger_exit(&self, kind: &TriggerKind) {
        self.logger.log_if(*kind == TriggerKind::SafeZone, TAG, || {
            "Player left safe zone".into()
        });
    }

    pub fn on_collision(&self, relative_speed: f64) {
        self.logger.log_if(relative_speed > HARD_COLLISION_SPEED, TAG, || {
            format!("Hard collision detected with velocity: {:.2}", relative_speed)
        });
    }

    fn check_health_change(&mut self) {
        let (last, current) = (self.last_health, self.health);
        self.logger.log_if(current != last, TAG, || {
            format!("Health changed from {} to {}", last, current)
        });
        self.last_health = current;
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.logger.log(TAG, "PlayerController destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framewatch_core::log::{LogLevel, MemorySink};
    use std::sync::Arc;

    fn player() -> (PlayerController, Arc<MemorySink>) {
        let memory = Arc::new(MemorySink::default());
        let logger = Logger::builder().sink(memory.clone()).build().unwrap();
        (PlayerController::new(logger, PlayerSettings::default()), memory)
    }

    fn messages(memory: &MemorySink) -> Vec<String> {
        memory.records().into_iter().map(|r| r.message).collect()
    }

    #[test]
    fn test_spawn_logs_health() {
        let (_player, memory) = player();
        assert_eq!(
            messages(&memory),
            vec!["PlayerController initialized with health: 100"]
        );
    }

    #[test]
    fn test_drop_logs() {
        let (player, memory) = player();
        drop(player);
        assert_eq!(
            messages(&memory).last().map(String::as_str),
            Some("PlayerController destroyed")
        );
    }

    #[test]
    fn test_idle_update_is_quiet() {
        let (mut player, memory) = player();
        memory.clear();
        player.update(PlayerInput::default());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_horizontal_input_logged() {
        let (mut player, memory) = player();
        memory.clear();
        player.update(PlayerInput {
            horizontal: -0.5,
            jump_pressed: false,
        });
        assert_eq!(messages(&memory), vec!["Horizontal input: -0.50"]);
    }

    #[test]
    fn test_double_jump_warns() {
        let (mut player, memory) = player();
        player.jump();
        assert!(!player.is_grounded());
        player.jump();

        let warnings = memory.records_at(LogLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Attempted to jump while not grounded");

        player.land();
        assert!(player.is_grounded());
    }

    #[test]
    fn test_enemy_trigger_damages_and_reports_change() {
        let (mut player, memory) = player();
        player.on_trigger_enter(&TriggerKind::Enemy);
        assert_eq!(player.health(), 90.0);

        memory.clear();
        player.update(PlayerInput::default());
        assert_eq!(messages(&memory), vec!["Health changed from 100 to 90"]);
    }

    #[test]
    fn test_death_logged_once() {
        let (mut player, memory) = player();
        player.take_damage(60.0);
        player.take_damage(60.0);
        player.take_damage(10.0);

        assert!(!player.is_alive());
        let errors: Vec<_> = memory
            .records_at(LogLevel::Error)
            .into_iter()
            .map(|r| r.message)
            .collect();
        assert_eq!(errors, vec!["Player died!", "Player death event triggered"]);
    }

    #[test]
    fn test_diagnostics_healthy() {
        let (player, memory) = player();
        memory.clear();
        player.run_diagnostics();

        let levels: Vec<_> = memory.records().iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Info,
                LogLevel::Warning,
                LogLevel::Error,
                LogLevel::Exception,
                LogLevel::Info
            ]
        );

        let exception = &memory.records_at(LogLevel::Exception)[0];
        assert_eq!(exception.message, "Test exception for debugging");
        assert!(exception.exception.is_some());
        assert_eq!(
            messages(&memory).last().map(String::as_str),
            Some("This should appear")
        );
    }

    #[test]
    fn test_diagnostics_after_death() {
        let (mut player, memory) = player();
        player.take_damage(120.0);
        memory.clear();
        player.run_diagnostics();

        let messages = messages(&memory);
        assert!(!messages.iter().any(|m| m == "This should NOT appear"));
        assert_eq!(
            &messages[messages.len() - 2..],
            ["Health is low!", "Player is dead!"]
        );
    }

    #[test]
    fn test_trigger_exit_and_collision_gates() {
        let (player, memory) = player();
        memory.clear();

        player.on_trigger_exit(&TriggerKind::Other("Door".into()));
        player.on_collision(2.0);
        assert!(memory.is_empty());

        player.on_trigger_exit(&TriggerKind::SafeZone);
        player.on_collision(7.25);
        assert_eq!(
            messages(&memory),
            vec![
                "Player left safe zone",
                "Hard collision detected with velocity: 7.25"
            ]
        );
    }

    #[test]
    fn test_movement() {
        let (mut player, _memory) = player();
        player.set_move_speed(2.0);
        player.update(PlayerInput {
            horizontal: 1.0,
            jump_pressed: false,
        });
        player.fixed_update(0.5);
        assert_eq!(player.position(), 1.0);
    }
}
