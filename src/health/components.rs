//! Health domain: hit points, invulnerability window and observers.

use std::collections::{HashMap, HashSet};
use std::fmt;

use bevy::prelude::*;

use crate::services::VisibilitySink;

/// Whitelist entry that lets any tagged attacker through.
pub const ALL_TAGS: &str = "All";

/// Caller-defined metadata passed through to health observers.
pub type AttackInfo = HashMap<String, String>;

type HealthChangedFn = Box<dyn Fn(f32, Option<&AttackInfo>) + Send + Sync>;
type DeathFn = Box<dyn Fn(Option<&AttackInfo>) + Send + Sync>;

/// Handle returned by observer registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Visibility toggles spread evenly across a grace period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashSchedule {
    started_at: f32,
    interval: f32,
    total: u32,
    done: u32,
}

impl FlashSchedule {
    fn new(started_at: f32, grace_period: f32, flashes: u32) -> Option<Self> {
        if flashes == 0 || grace_period <= 0.0 {
            return None;
        }
        let total = flashes * 2;
        Some(Self {
            started_at,
            interval: grace_period / total as f32,
            total,
            done: 0,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.done >= self.total
    }

    /// Applies every toggle due by `now`. The first toggle is due immediately.
    fn tick(&mut self, now: f32) -> bool {
        while !self.is_finished() && now >= self.started_at + self.done as f32 * self.interval {
            self.done += 1;
        }
        self.done % 2 == 0
    }
}

/// Hit points with a grace period after each accepted hit. Once hp reaches
/// zero the entity is dead and nothing mutates it again.
#[derive(Component)]
pub struct Health {
    hp: f32,
    max_hp: f32,
    grace_period: f32,
    last_hit_time: Option<f32>,
    flash_count: u32,
    whitelist: HashSet<String>,
    heal_cap: Option<f32>,
    dead: bool,
    flash: Option<FlashSchedule>,
    changed_observers: Vec<(SubscriptionId, HealthChangedFn)>,
    death_observers: Vec<(SubscriptionId, DeathFn)>,
    next_subscription: u64,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl fmt::Debug for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Health")
            .field("hp", &self.hp)
            .field("max_hp", &self.max_hp)
            .field("grace_period", &self.grace_period)
            .field("last_hit_time", &self.last_hit_time)
            .field("whitelist", &self.whitelist)
            .field("dead", &self.dead)
            .field("observers", &(self.changed_observers.len() + self.death_observers.len()))
            .finish()
    }
}

impl Health {
    pub fn new(hp: f32) -> Self {
        Self {
            hp,
            max_hp: hp,
            grace_period: 0.8,
            last_hit_time: None,
            flash_count: 4,
            whitelist: HashSet::new(),
            heal_cap: None,
            dead: false,
            flash: None,
            changed_observers: Vec::new(),
            death_observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_grace_period(mut self, seconds: f32) -> Self {
        self.set_grace_period(seconds);
        self
    }

    pub fn with_flash_count(mut self, flashes: u32) -> Self {
        self.flash_count = flashes;
        self
    }

    pub fn with_whitelist<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Clamps healing to `cap`. Healing is unbounded otherwise.
    pub fn with_heal_cap(mut self, cap: f32) -> Self {
        self.heal_cap = Some(cap);
        self
    }

    pub fn hp(&self) -> f32 {
        self.hp
    }

    /// The hp this entity started with.
    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn grace_period(&self) -> f32 {
        self.grace_period
    }

    /// Changing the grace period lets the next hit through.
    pub fn set_grace_period(&mut self, seconds: f32) {
        self.grace_period = seconds.max(0.0);
        self.last_hit_time = None;
    }

    pub fn flash_count(&self) -> u32 {
        self.flash_count
    }

    pub fn whitelist(&self) -> &HashSet<String> {
        &self.whitelist
    }

    pub fn whitelist_tag(&mut self, tag: impl Into<String>) {
        self.whitelist.insert(tag.into());
    }

    pub fn is_in_grace(&self, now: f32) -> bool {
        self.last_hit_time
            .is_some_and(|last| now < last + self.grace_period)
    }

    /// Untagged damage always passes. Tagged damage needs the tag, or "All",
    /// on the whitelist.
    pub fn accepts(&self, attacker_tag: Option<&str>) -> bool {
        match attacker_tag {
            None => true,
            Some(tag) => self.whitelist.contains(tag) || self.whitelist.contains(ALL_TAGS),
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    /// Returns true iff the damage was applied.
    pub fn take_damage(
        &mut self,
        now: f32,
        amount: f32,
        attacker_tag: Option<&str>,
        info: Option<&AttackInfo>,
    ) -> bool {
        if self.dead || self.is_in_grace(now) || !self.accepts(attacker_tag) {
            return false;
        }

        self.last_hit_time = Some(now);
        self.hp -= amount;

        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.dead = true;
            self.flash = None;
            self.notify_changed(info);
            for (_, observer) in &self.death_observers {
                observer(info);
            }
            debug!("lethal hit for {} from {:?}", amount, attacker_tag);
        } else {
            self.notify_changed(info);
            self.flash = FlashSchedule::new(now, self.grace_period, self.flash_count);
        }

        true
    }

    /// Adds `amount` hp and notifies observers without attack info. Healing the
    /// dead is a bug.
    pub fn heal(&mut self, amount: f32) -> bool {
        debug_assert!(!self.dead, "heal called on a dead entity");
        if self.dead {
            return false;
        }

        self.hp += amount;
        if let Some(cap) = self.heal_cap {
            self.hp = self.hp.min(cap);
        }
        self.notify_changed(None);
        true
    }

    fn notify_changed(&self, info: Option<&AttackInfo>) {
        for (_, observer) in &self.changed_observers {
            observer(self.hp, info);
        }
    }

    fn next_id(&mut self) -> SubscriptionId {
        self.next_subscription += 1;
        SubscriptionId(self.next_subscription)
    }

    /// Called with the new hp after every accepted hit or heal.
    pub fn on_health_changed(
        &mut self,
        observer: impl Fn(f32, Option<&AttackInfo>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.changed_observers.push((id, Box::new(observer)));
        id
    }

    pub fn on_death(
        &mut self,
        observer: impl Fn(Option<&AttackInfo>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.death_observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.changed_observers.len() + self.death_observers.len();
        self.changed_observers.retain(|(existing, _)| *existing != id);
        self.death_observers.retain(|(existing, _)| *existing != id);
        before != self.changed_observers.len() + self.death_observers.len()
    }

    /// Drives the grace-period flash. Visibility is restored once the
    /// schedule completes.
    pub fn tick_flash(&mut self, now: f32, sink: &mut dyn VisibilitySink) {
        let Some(schedule) = self.flash.as_mut() else {
            return;
        };
        let visible = schedule.tick(now);
        if schedule.is_finished() {
            self.flash = None;
            sink.set_visible(true);
        } else {
            sink.set_visible(visible);
        }
    }
}
