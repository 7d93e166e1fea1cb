//! A resolved build: parts with their normalized specs, grouped by category.

use crate::catalog::{Part, PartId, PartType};
use crate::specs::NormalizedSpecs;

/// A borrowed part plus its specs, normalized once.
#[derive(Debug, Clone)]
pub struct PartView<'a> {
    pub part: &'a Part,
    pub specs: NormalizedSpecs,
}

impl<'a> PartView<'a> {
    pub fn new(part: &'a Part) -> Self {
        Self {
            part,
            specs: part.normalized(),
        }
    }

    pub fn id(&self) -> PartId {
        self.part.id
    }

    pub fn name(&self) -> &'a str {
        &self.part.name
    }

    pub fn part_type(&self) -> &'a PartType {
        &self.part.part_type
    }
}

/// Parts of one build, grouped by category.
///
/// Both the part list and the category groups keep insertion order, so every
/// walk over a build is reproducible.
#[derive(Debug, Clone, Default)]
pub struct BuildParts<'a> {
    parts: Vec<PartView<'a>>,
    groups: Vec<(PartType, Vec<usize>)>,
}

impl<'a> BuildParts<'a> {
    pub fn new(parts: impl IntoIterator<Item = &'a Part>) -> Self {
        let mut build = Self::default();
        for part in parts {
            let index = build.parts.len();
            build.parts.push(PartView::new(part));
            match build
                .groups
                .iter_mut()
                .find(|(part_type, _)| *part_type == part.part_type)
            {
                Some((_, members)) => members.push(index),
                None => build.groups.push((part.part_type.clone(), vec![index])),
            }
        }
        build
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartView<'a>> {
        self.parts.iter()
    }

    /// Members of one category, in insertion order.
    pub fn of_type(&self, part_type: &PartType) -> impl Iterator<Item = &PartView<'a>> + '_ {
        let members: &[usize] = self
            .groups
            .iter()
            .find(|(t, _)| t == part_type)
            .map(|(_, members)| members.as_slice())
            .unwrap_or_default();
        members.iter().map(move |&i| &self.parts[i])
    }

    pub fn has_type(&self, part_type: &PartType) -> bool {
        self.groups.iter().any(|(t, _)| t == part_type)
    }

    /// Categories present, in order of first appearance.
    pub fn categories(&self) -> impl Iterator<Item = &PartType> {
        self.groups.iter().map(|(t, _)| t)
    }
}
