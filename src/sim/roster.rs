//! Enemy roster
//!
//! A fixed-size arena of enemies addressed by stable [`Handle`]s. The roster
//! owns every enemy, including bullets; shooters only refer to their bullet
//! by handle. Iteration order is slot order and never changes.

use std::collections::HashMap;

use thiserror::Error;

use super::entity::{Entity, Role};

/// Stable index of an enemy in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Roster wiring problems, detected before the simulation starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("shooter {shooter} refers to missing bullet {bullet}")]
    DanglingBullet { shooter: Handle, bullet: Handle },
    #[error("shooter {shooter} refers to {target}, which is not a bullet")]
    NotABullet { shooter: Handle, target: Handle },
    #[error("bullet {bullet} is shared by shooters {first} and {second}")]
    SharedBullet {
        bullet: Handle,
        first: Handle,
        second: Handle,
    },
    #[error("bullet {bullet} has no shooter")]
    OrphanBullet { bullet: Handle },
    #[error("player entity placed in the enemy roster at {0}")]
    PlayerInRoster(Handle),
}

/// Collects enemies and hands out handles before validation
#[derive(Debug, Default)]
pub struct RosterBuilder {
    slots: Vec<Entity>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the next pushed entity will get
    pub fn next_handle(&self) -> Handle {
        Handle(self.slots.len() as u32)
    }

    pub fn push(&mut self, entity: Entity) -> Handle {
        let handle = self.next_handle();
        self.slots.push(entity);
        handle
    }

    /// Validate shooter/bullet wiring and freeze the roster
    pub fn build(self) -> Result<EnemyRoster, RosterError> {
        let mut owners: HashMap<Handle, Handle> = HashMap::new();

        for (index, entity) in self.slots.iter().enumerate() {
            let handle = Handle(index as u32);
            match &entity.role {
                Role::Player => return Err(RosterError::PlayerInRoster(handle)),
                Role::Shooter(brain) => {
                    let bullet = brain.bullet;
                    match self.slots.get(bullet.index()).map(|e| &e.role) {
                        None => {
                            return Err(RosterError::DanglingBullet {
                                shooter: handle,
                                bullet,
                            });
                        }
                        Some(Role::Bullet(_)) => {}
                        Some(_) => {
                            return Err(RosterError::NotABullet {
                                shooter: handle,
                                target: bullet,
                            });
                        }
                    }
                    if let Some(first) = owners.insert(bullet, handle) {
                        return Err(RosterError::SharedBullet {
                            bullet,
                            first,
                            second: handle,
                        });
                    }
                }
                _ => {}
            }
        }

        for (index, entity) in self.slots.iter().enumerate() {
            let handle = Handle(index as u32);
            if entity.is_bullet() && !owners.contains_key(&handle) {
                return Err(RosterError::OrphanBullet { bullet: handle });
            }
        }

        Ok(EnemyRoster { slots: self.slots })
    }
}

/// Validated, fixed-size enemy collection
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyRoster {
    slots: Vec<Entity>,
}

impl EnemyRoster {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, handle: Handle) -> Option<&Entity> {
        self.slots.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entity> {
        self.slots.get_mut(handle.index())
    }

    /// All handles in slot order. Does not borrow the roster.
    pub fn handles(&self) -> impl Iterator<Item = Handle> + use<> {
        (0..self.slots.len() as u32).map(Handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, e)| (Handle(i as u32), e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut Entity)> {
        self.slots
            .iter_mut()
            .enumerate()
            .map(|(i, e)| (Handle(i as u32), e))
    }

    /// Number of bullets (never counted as kills)
    pub fn bullet_count(&self) -> usize {
        self.slots.iter().filter(|e| e.is_bullet()).count()
    }

    /// Enemies that must be defeated to win
    pub fn countable(&self) -> usize {
        self.len() - self.bullet_count()
    }

    /// Enemies currently defeated, bullets excluded
    pub fn defeated(&self) -> usize {
        self.slots
            .iter()
            .filter(|e| !e.active && !e.is_bullet())
            .count()
    }
}
