// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View tree adapter: the tree's parent back-references are the responder
//! chain.

use thimble_view_tree::{Tree, ViewId};

use crate::dispatch::ParentLookup;

impl ParentLookup<ViewId> for Tree {
    fn parent_of(&self, node: ViewId) -> Option<ViewId> {
        Tree::parent_of(self, node)
    }
}
