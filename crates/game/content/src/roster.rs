//! Declarative combatant entries and the two-team roster they build.

use battle_core::{
    ActionSpec, BattleConfig, BattleSimulation, Combatant, CombatantId, SetupError, StatBlock,
    Team,
};

/// One combatant as written in a roster file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    pub team: Team,
    pub max_health: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    /// Repertoire; omitted entries get one action of every kind.
    #[cfg_attr(feature = "serde", serde(default = "standard_actions"))]
    pub actions: Vec<ActionSpec>,
}

#[cfg(feature = "serde")]
fn standard_actions() -> Vec<ActionSpec> {
    ActionSpec::STANDARD.to_vec()
}

impl CombatantSpec {
    /// Builds the live combatant; the stat block is validated here.
    pub fn spawn(&self, id: CombatantId, config: &BattleConfig) -> Result<Combatant, SetupError> {
        let stats = StatBlock::new(self.max_health, self.attack, self.defense, self.speed)?;
        Combatant::spawn(id, self.name.clone(), self.team, stats, &self.actions, config)
    }
}

/// Both teams, ready to hand to a simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    pub players: Vec<Combatant>,
    pub enemies: Vec<Combatant>,
}

impl Roster {
    /// Spawns every entry in file order. Ids are assigned sequentially from
    /// zero across both teams.
    pub fn from_specs(specs: &[CombatantSpec], config: &BattleConfig) -> Result<Self, SetupError> {
        let mut roster = Self::default();
        for (index, spec) in specs.iter().enumerate() {
            let id = CombatantId(index as u32);
            roster.push(spec.spawn(id, config)?);
        }
        Ok(roster)
    }

    /// Appends a combatant to the roster matching its team.
    pub fn push(&mut self, combatant: Combatant) {
        match combatant.team() {
            Team::Player => self.players.push(combatant),
            Team::Enemy => self.enemies.push(combatant),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len() + self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.enemies.is_empty()
    }

    pub fn into_simulation(
        self,
        config: BattleConfig,
        seed: u64,
    ) -> Result<BattleSimulation, SetupError> {
        BattleSimulation::new(config, self.players, self.enemies, seed)
    }
}
