use crate::codec::command::Command;
use crate::codec::delimited::{decode_elements, encode_elements, DelimitedElement, Separators};
use crate::codec::descriptor::ElementDescriptor;
use crate::dom::dom_model::{Document, NodeId};
use crate::engine::error::LocatorError;
use crate::engine::playback::{resolve_command, Resolution};
use crate::identity::deriver::component_type;
use crate::locator::locator_model::{ElementQuery, Match, Scope};
use crate::locator::matcher::find_element;
use crate::record::recorder::{build_command, record_target, RecordEvent};
use crate::record::tree::{component_tree, ComponentNode, DEFAULT_MAX_ID_LEN};
use crate::trace::{
    logger::TraceLogger,
    trace::{document_fingerprint, Operation, TraceEvent},
};

/// Entry point tying the record and playback paths to a trace sink. Holds no
/// document state: every call takes the document it works on.
pub struct Engine {
    pub step: u64,
    tracer: TraceLogger,
    separators: Separators,
    extra_attributes: Vec<String>,
    max_id_len: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with tracing disabled and default codec settings
    pub fn new() -> Engine {
        Engine {
            step: 0,
            tracer: TraceLogger::disabled(),
            separators: Separators::default(),
            extra_attributes: Vec::new(),
            max_id_len: DEFAULT_MAX_ID_LEN,
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Engine {
        self.tracer = tracer;
        self
    }

    pub fn with_separators(mut self, separators: Separators) -> Engine {
        self.separators = separators;
        self
    }

    pub fn with_extra_attributes(mut self, extra_attributes: Vec<String>) -> Engine {
        self.extra_attributes = extra_attributes;
        self
    }

    pub fn with_max_id_len(mut self, max_id_len: usize) -> Engine {
        self.max_id_len = max_id_len;
        self
    }

    // =====================================================================
    // Record path
    // =====================================================================

    /// Descriptor (with monkeyId) for one element.
    pub fn identify(&mut self, doc: &Document, node: NodeId) -> ElementDescriptor {
        let descriptor = ElementDescriptor::from_node(doc, node);
        let mut trace = self.event(Operation::Derive, doc).with_component(component_type(doc, node));
        if let Some(id) = &descriptor.monkey_id {
            trace = trace.with_monkey_id(id);
        }
        self.tracer.log(&trace.with_outcome("derived"));
        descriptor
    }

    /// Command for an event on `node`, after redirecting to the record target.
    pub fn record(&mut self, doc: &Document, node: NodeId, event: RecordEvent) -> Option<Command> {
        let target = record_target(doc, node);
        let command = build_command(doc, target, event);

        let trace = self.event(Operation::Record, doc).with_detail(event);
        match &command {
            Some(c) => self.tracer.log(
                &trace
                    .with_component(c.component_type)
                    .with_monkey_id(&c.monkey_id)
                    .with_outcome("recorded"),
            ),
            None => self.tracer.log(&trace.with_outcome("ignored")),
        }
        command
    }

    pub fn tree(&mut self, doc: &Document) -> ComponentNode {
        let tree = component_tree(doc, self.max_id_len);
        let trace = self
            .event(Operation::Derive, doc)
            .with_outcome("tree")
            .with_detail(format!("{} components", tree.descendant_count()));
        self.tracer.log(&trace);
        tree
    }

    pub fn encode(&mut self, doc: &Document, nodes: &[NodeId]) -> String {
        let encoded = encode_elements(doc, nodes, &self.extra_attributes, &self.separators);
        let trace = self
            .event(Operation::Encode, doc)
            .with_outcome("encoded")
            .with_detail(format!("{} elements", nodes.len()));
        self.tracer.log(&trace);
        encoded
    }

    /// Decode a delimited payload. Malformed descriptors are traced and
    /// returned alongside the patched-up elements.
    pub fn decode(&mut self, encoded: &str) -> (Vec<DelimitedElement>, Vec<LocatorError>) {
        let report = decode_elements(encoded, &self.extra_attributes, &self.separators);
        for warning in &report.warnings {
            let trace = TraceEvent::now(self.next_step(), Operation::Decode)
                .with_outcome("malformed")
                .with_detail(warning);
            self.tracer.log(&trace);
        }
        (report.elements, report.warnings)
    }

    // =====================================================================
    // Playback path
    // =====================================================================

    pub fn locate(&mut self, doc: &Document, query: &ElementQuery, scope: &Scope) -> Option<Match> {
        let found = find_element(doc, query, scope);
        let trace = self.event(Operation::Locate, doc).with_monkey_id(&query.monkey_id);
        match found {
            Some(m) => self.tracer.log(&trace.with_tier(m.tier).with_outcome("found")),
            None => self.tracer.log(&trace.with_outcome("not_found")),
        }
        found
    }

    /// Resolve a command for playback. A radio or table item that cannot be
    /// found is traced and reported as a resolution without target.
    pub fn resolve(&mut self, doc: &mut Document, command: &Command) -> Result<Resolution, LocatorError> {
        let result = resolve_command(doc, command);
        let trace = self
            .event(Operation::Resolve, doc)
            .with_component(command.component_type)
            .with_monkey_id(&command.monkey_id);

        match &result {
            Ok(resolution) => {
                let trace = trace.with_tier(resolution.tier);
                if resolution.target.is_some() {
                    self.tracer.log(&trace.with_outcome("resolved"));
                } else {
                    self.tracer.log(
                        &trace
                            .with_outcome("target_not_found")
                            .with_detail(format!("{} '{}'", command.action, command.args)),
                    );
                }
            }
            Err(e) => self.tracer.log(&trace.with_outcome("failed").with_detail(e)),
        }
        result
    }

    // =====================================================================
    // Helpers
    // =====================================================================

    fn next_step(&mut self) -> u64 {
        let step = self.step;
        self.step += 1;
        step
    }

    fn event(&mut self, operation: Operation, doc: &Document) -> TraceEvent {
        let trace = TraceEvent::now(self.next_step(), operation);
        if self.tracer.is_enabled() {
            trace.with_document(&document_fingerprint(doc))
        } else {
            trace
        }
    }
}
