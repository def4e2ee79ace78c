//! Entities (coreference clusters) and mention-to-entity assignments.
//!
//! A [`Clustering`] is the document-scoped state a resolver builds: an arena
//! of [`Entity`] values addressed by [`EntityId`], plus one
//! [`ClusteredMention`] per assigned mention in the order assignments were
//! made. Entities are identified by id, not by content: two entities holding
//! mentions with identical text are still distinct.
//!
//! # Lifecycle
//!
//! ```text
//! UNSEEN --mark_singleton--> Singleton
//! UNSEEN --mark_coreferent--> ExactMatch
//! Singleton | ExactMatch --change_coreference--> PartialMatch
//! ```
//!
//! Entities are never removed. Redirecting a mention away from an entity may
//! leave it empty; [`Clustering::entities`] skips empty ones.
//!
//! # Example
//!
//! ```rust
//! use corefer_core::{Clustering, Document};
//!
//! let doc = Document::from_glosses("d", &["Obama", "obama", "Michelle"]);
//! let mut clustering = Clustering::new(&doc);
//! let obama = clustering.mark_singleton(0)?;
//! clustering.mark_coreferent(1, obama)?;
//! clustering.mark_singleton(2)?;
//!
//! assert_eq!(clustering.entities().count(), 2);
//! assert_eq!(clustering.entity_of(1), Some(obama));
//! # Ok::<(), corefer_core::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::mention::{Document, Mention};
use serde::{Deserialize, Serialize};

/// Identifier of an entity within one [`Clustering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub usize);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A set of mentions believed to co-refer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier within the clustering
    pub id: EntityId,
    /// Index of the mention that created this entity
    pub founder: usize,
    /// Member mention indices, in the order they were added
    members: Vec<usize>,
}

impl Entity {
    /// Member mention indices, in insertion order.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if every member has been redirected elsewhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True if exactly one mention belongs to this entity.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    /// Whether the mention at `index` is a member.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }
}

/// How a mention came to be linked to its current entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkOrigin {
    /// Started a new entity.
    Singleton,
    /// Joined an existing entity with identical text.
    ExactMatch,
    /// Redirected to a better-overlapping entity.
    PartialMatch,
}

/// A mention paired with the entity it is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusteredMention<'d> {
    /// The mention
    pub mention: &'d Mention,
    /// Its current entity
    pub entity: EntityId,
    /// How the link was made
    pub origin: LinkOrigin,
}

/// Document-scoped clustering state.
#[derive(Debug, Clone)]
pub struct Clustering<'d> {
    document: &'d Document,
    entities: Vec<Entity>,
    assigned: Vec<ClusteredMention<'d>>,
    /// mention index -> position in `assigned`
    slots: Vec<Option<usize>>,
}

impl<'d> Clustering<'d> {
    /// Create an empty clustering over `document`.
    #[must_use]
    pub fn new(document: &'d Document) -> Self {
        Self {
            document,
            entities: Vec::new(),
            assigned: Vec::with_capacity(document.len()),
            slots: vec![None; document.len()],
        }
    }

    /// The document being clustered.
    #[must_use]
    pub fn document(&self) -> &'d Document {
        self.document
    }

    fn unassigned(&self, index: usize) -> Result<&'d Mention> {
        let mention = self
            .document
            .mention(index)
            .ok_or(Error::UnknownMention(index))?;
        if self.slots[index].is_some() {
            return Err(Error::AlreadyClustered(index));
        }
        Ok(mention)
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities
            .get_mut(id.0)
            .ok_or(Error::UnknownEntity(id.0))
    }

    fn push(&mut self, index: usize, mention: &'d Mention, entity: EntityId, origin: LinkOrigin) {
        self.slots[index] = Some(self.assigned.len());
        self.assigned.push(ClusteredMention {
            mention,
            entity,
            origin,
        });
    }

    /// Put the mention at `index` into a brand-new entity of its own.
    pub fn mark_singleton(&mut self, index: usize) -> Result<EntityId> {
        let mention = self.unassigned(index)?;
        let id = EntityId(self.entities.len());
        self.entities.push(Entity {
            id,
            founder: index,
            members: vec![index],
        });
        self.push(index, mention, id, LinkOrigin::Singleton);
        Ok(id)
    }

    /// Add the mention at `index` to an existing entity.
    pub fn mark_coreferent(&mut self, index: usize, entity: EntityId) -> Result<()> {
        let mention = self.unassigned(index)?;
        self.entity_mut(entity)?.members.push(index);
        self.push(index, mention, entity, LinkOrigin::ExactMatch);
        Ok(())
    }

    /// Redirect an already-assigned mention to another entity.
    ///
    /// The mention keeps its position in the output sequence; only its link
    /// changes. Redirecting to the current entity is a no-op.
    pub fn change_coreference(&mut self, index: usize, entity: EntityId) -> Result<()> {
        if self.document.mention(index).is_none() {
            return Err(Error::UnknownMention(index));
        }
        let slot = self.slots[index].ok_or(Error::NotClustered(index))?;
        let current = self.assigned[slot].entity;
        if current == entity {
            return Ok(());
        }
        self.entity_mut(entity)?.members.push(index);
        self.entity_mut(current)?.members.retain(|&m| m != index);
        let link = &mut self.assigned[slot];
        link.entity = entity;
        link.origin = LinkOrigin::PartialMatch;
        Ok(())
    }

    /// Assignments in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &ClusteredMention<'d>> {
        self.assigned.iter()
    }

    /// Assignment at output position `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&ClusteredMention<'d>> {
        self.assigned.get(position)
    }

    /// Number of assigned mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Whether nothing has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// True once every mention of the document has an entity.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.assigned.len() == self.document.len()
    }

    /// Entity currently holding the mention at `index`.
    #[must_use]
    pub fn entity_of(&self, index: usize) -> Option<EntityId> {
        let slot = (*self.slots.get(index)?)?;
        Some(self.assigned[slot].entity)
    }

    /// Look up an entity by id, including emptied ones.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Distinct non-empty entities, in creation order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.is_empty())
    }

    /// First current member of an entity, standing in for the whole cluster.
    #[must_use]
    pub fn exemplar(&self, id: EntityId) -> Option<&'d Mention> {
        let first = *self.entity(id)?.members.first()?;
        self.document.mention(first)
    }

    /// Whether two mentions currently share an entity.
    #[must_use]
    pub fn coreferent(&self, a: usize, b: usize) -> bool {
        match (self.entity_of(a), self.entity_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Mentions grouped per non-empty entity, members in insertion order.
    #[must_use]
    pub fn chains(&self) -> Vec<Vec<&'d Mention>> {
        let document = self.document;
        self.entities()
            .map(|e| {
                e.members
                    .iter()
                    .filter_map(|&i| document.mention(i))
                    .collect()
            })
            .collect()
    }

    /// Consume the clustering, keeping only the output sequence.
    #[must_use]
    pub fn into_assignments(self) -> Vec<ClusteredMention<'d>> {
        self.assigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(glosses: &[&str]) -> Document {
        Document::from_glosses("test", glosses)
    }

    #[test]
    fn test_singleton_creates_distinct_entities() {
        let d = doc(&["Obama", "Obama"]);
        let mut c = Clustering::new(&d);
        let a = c.mark_singleton(0).unwrap();
        let b = c.mark_singleton(1).unwrap();
        // Same text, separately built: still distinct.
        assert_ne!(a, b);
        assert_eq!(c.entities().count(), 2);
        assert!(c.entity(a).unwrap().is_singleton());
    }

    #[test]
    fn test_mark_coreferent_joins_entity() {
        let d = doc(&["Obama", "obama"]);
        let mut c = Clustering::new(&d);
        let e = c.mark_singleton(0).unwrap();
        c.mark_coreferent(1, e).unwrap();
        assert_eq!(c.entity(e).unwrap().members(), &[0, 1]);
        assert_eq!(c.get(1).unwrap().origin, LinkOrigin::ExactMatch);
        assert!(c.coreferent(0, 1));
        assert!(c.is_complete());
    }

    #[test]
    fn test_double_assignment_rejected() {
        let d = doc(&["a"]);
        let mut c = Clustering::new(&d);
        let e = c.mark_singleton(0).unwrap();
        assert_eq!(c.mark_singleton(0), Err(Error::AlreadyClustered(0)));
        assert_eq!(c.mark_coreferent(0, e), Err(Error::AlreadyClustered(0)));
    }

    #[test]
    fn test_unknown_indices_rejected() {
        let d = doc(&["a"]);
        let mut c = Clustering::new(&d);
        assert_eq!(c.mark_singleton(3), Err(Error::UnknownMention(3)));
        assert_eq!(
            c.mark_coreferent(0, EntityId(9)),
            Err(Error::UnknownEntity(9))
        );
        assert_eq!(
            c.change_coreference(0, EntityId(0)),
            Err(Error::NotClustered(0))
        );
    }

    #[test]
    fn test_change_coreference_keeps_position() {
        let d = doc(&["New York City Hall", "New York City", "Boston"]);
        let mut c = Clustering::new(&d);
        let hall = c.mark_singleton(0).unwrap();
        let city = c.mark_singleton(1).unwrap();
        c.mark_singleton(2).unwrap();

        c.change_coreference(1, hall).unwrap();

        let order: Vec<usize> = c.iter().map(|cm| cm.mention.index()).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(c.get(1).unwrap().entity, hall);
        assert_eq!(c.get(1).unwrap().origin, LinkOrigin::PartialMatch);
        assert!(c.entity(city).unwrap().is_empty());
        assert_eq!(c.entities().count(), 2);
        assert_eq!(c.exemplar(city), None);
        assert_eq!(c.exemplar(hall).map(Mention::gloss), Some("New York City Hall"));
    }

    #[test]
    fn test_change_to_same_entity_is_noop() {
        let d = doc(&["a"]);
        let mut c = Clustering::new(&d);
        let e = c.mark_singleton(0).unwrap();
        c.change_coreference(0, e).unwrap();
        assert_eq!(c.get(0).unwrap().origin, LinkOrigin::Singleton);
        assert_eq!(c.entity(e).unwrap().members(), &[0]);
    }

    #[test]
    fn test_chains_group_members() {
        let d = doc(&["John", "he", "Mary"]);
        let mut c = Clustering::new(&d);
        let john = c.mark_singleton(0).unwrap();
        c.mark_singleton(1).unwrap();
        c.mark_singleton(2).unwrap();
        c.change_coreference(1, john).unwrap();

        let chains = c.chains();
        assert_eq!(chains.len(), 2);
        let glosses: Vec<&str> = chains[0].iter().map(|m| m.gloss()).collect();
        assert_eq!(glosses, vec!["John", "he"]);
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(4).to_string(), "E4");
    }
}
