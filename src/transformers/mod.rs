/*! Document transformers.

Passes that normalize the tree or remove content from it.
Every pass is available both as a function over an [crate::tree::Element]
and as a [Transform] over a whole [crate::tree::Document].

!*/

mod ids;
mod prune;
mod remove;
mod sections;
mod transform;
mod unprettify;

pub use ids::{assign_ids, AssignIds};
pub use prune::{is_empty, remove_empty, RemoveEmpty};
pub use remove::{in_set, matches, remove_tags, RemoveTags, TagMatcher};
pub use sections::{remove_trailing_sections, section_title, RemoveSections, SectionFilter};
pub use transform::Transform;
pub use unprettify::{merge_strings, unprettify, MergeStrings, Unprettify};
