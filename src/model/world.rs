use std::collections::{BTreeMap, BTreeSet};

use crate::model::champion::{Champion, HiddenStats, Identity, Role, Stats, TeamId};
use crate::model::lane::{LaneId, LaneState};

/// Tags indexed for combination queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag {
    Champion,
    OnTeam(TeamId),
    InLane(LaneId),
}

/// Metadata channels. One-way export between systems within a tick; keys are
/// a closed set so producers and consumers agree on the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MetaKey {
    LanePressure(LaneId),
    DamageMultiplier,
    GoldMultiplier,
    Winner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetaValue {
    Scalar(f64),
    Team(TeamId),
}

/// The entity store. Owns every champion, the three lanes, the tick counter,
/// a tag index, and the metadata channel. Exactly one match simulator owns a
/// world for the lifetime of one match; nothing is shared across matches.
///
/// All containers are ordered (`BTreeMap`/`BTreeSet`), so iteration order,
/// and therefore RNG consumption order, is identical across runs.
#[derive(Debug)]
pub struct World {
    pub champions: BTreeMap<u64, Champion>,
    pub lanes: BTreeMap<LaneId, LaneState>,
    pub tick: u64,
    tags: BTreeMap<Tag, BTreeSet<u64>>,
    metadata: BTreeMap<MetaKey, MetaValue>,
    next_id: u64,
}

impl World {
    pub fn new() -> Self {
        let mut lanes = BTreeMap::new();
        for lane in LaneId::ALL {
            lanes.insert(lane, LaneState::default());
        }
        Self {
            champions: BTreeMap::new(),
            lanes,
            tick: 0,
            tags: BTreeMap::new(),
            metadata: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Add a champion, assigning it a unique ID and registering its tags.
    /// The component set is fixed here and never changes shape afterwards.
    pub fn add_champion(
        &mut self,
        name: String,
        role: Role,
        team: TeamId,
        stats: Stats,
        hidden: HiddenStats,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.tag(Tag::Champion, id);
        self.tag(Tag::OnTeam(team), id);
        if let Some(lane) = role.lane() {
            self.tag(Tag::InLane(lane), id);
        }

        self.champions.insert(
            id,
            Champion {
                identity: Identity {
                    id,
                    name,
                    role,
                    team,
                },
                stats,
                hidden,
                items: Vec::new(),
                leveling: Default::default(),
                abilities: Default::default(),
            },
        );
        id
    }

    fn tag(&mut self, tag: Tag, id: u64) {
        self.tags.entry(tag).or_default().insert(id);
    }

    pub fn champion(&self, id: u64) -> Option<&Champion> {
        self.champions.get(&id)
    }

    pub fn champion_mut(&mut self, id: u64) -> Option<&mut Champion> {
        self.champions.get_mut(&id)
    }

    /// All champion IDs in ascending order, the canonical iteration order.
    pub fn champion_ids(&self) -> Vec<u64> {
        self.champions.keys().copied().collect()
    }

    /// IDs matching every tag in `tags`, ascending. No tags matches all
    /// champions.
    pub fn champions_with(&self, tags: &[Tag]) -> Vec<u64> {
        let mut sets = tags.iter().map(|t| self.tags.get(t));
        let Some(first) = sets.next() else {
            return self.champion_ids();
        };
        let Some(first) = first else {
            return Vec::new();
        };
        let mut result: BTreeSet<u64> = first.clone();
        for set in sets {
            match set {
                Some(set) => result.retain(|id| set.contains(id)),
                None => return Vec::new(),
            }
        }
        result.into_iter().collect()
    }

    pub fn team_champions(&self, team: TeamId) -> Vec<u64> {
        self.champions_with(&[Tag::OnTeam(team)])
    }

    pub fn laners(&self, team: TeamId, lane: LaneId) -> Vec<u64> {
        self.champions_with(&[Tag::OnTeam(team), Tag::InLane(lane)])
    }

    pub fn lane(&self, id: LaneId) -> &LaneState {
        &self.lanes[&id]
    }

    pub fn lane_mut(&mut self, id: LaneId) -> &mut LaneState {
        self.lanes.get_mut(&id).expect("world always has three lanes")
    }

    pub fn set_metadata(&mut self, key: MetaKey, value: MetaValue) {
        self.metadata.insert(key, value);
    }

    pub fn metadata(&self, key: MetaKey) -> Option<MetaValue> {
        self.metadata.get(&key).copied()
    }

    pub fn set_lane_pressure(&mut self, lane: LaneId, pressure: f64) {
        self.set_metadata(MetaKey::LanePressure(lane), MetaValue::Scalar(pressure));
    }

    pub fn lane_pressure(&self, lane: LaneId) -> Option<f64> {
        match self.metadata(MetaKey::LanePressure(lane)) {
            Some(MetaValue::Scalar(v)) => Some(v),
            _ => None,
        }
    }

    pub fn set_winner(&mut self, team: TeamId) {
        self.set_metadata(MetaKey::Winner, MetaValue::Team(team));
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self.metadata(MetaKey::Winner) {
            Some(MetaValue::Team(team)) => Some(team),
            _ => None,
        }
    }

    fn scalar_or(&self, key: MetaKey, default: f64) -> f64 {
        match self.metadata(key) {
            Some(MetaValue::Scalar(v)) => v,
            _ => default,
        }
    }

    /// Ambient damage multiplier exported by the weather system (1.0 when
    /// nothing is active).
    pub fn damage_multiplier(&self) -> f64 {
        self.scalar_or(MetaKey::DamageMultiplier, 1.0)
    }

    pub fn gold_multiplier(&self) -> f64 {
        self.scalar_or(MetaKey::GoldMultiplier, 1.0)
    }

    pub fn team_kills(&self, team: TeamId) -> u32 {
        self.champions
            .values()
            .filter(|c| c.team() == team)
            .map(|c| c.stats.kills)
            .sum()
    }

    pub fn team_gold(&self, team: TeamId) -> u32 {
        self.champions
            .values()
            .filter(|c| c.team() == team)
            .map(|c| c.stats.gold)
            .sum()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
