// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::{NodeClient, TxSender};

/// Shared application state: one read client and one signing client,
/// both built at startup.
#[derive(Clone)]
pub struct AppState {
    pub node: Arc<NodeClient>,
    pub sender: Arc<TxSender>,
}

impl AppState {
    pub fn new(node: NodeClient, sender: TxSender) -> Self {
        Self {
            node: Arc::new(node),
            sender: Arc::new(sender),
        }
    }
}
