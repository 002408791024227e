//! The per-control interaction state machine.

use maskedinput_engine::{InputMask, MaskError, PatternUpdate, Selection};

use crate::ControlError;
use crate::control::TextControl;
use crate::events::{
    ChangeCause, ChangeEvent, CharacterInput, InputText, Key, KeyDown, Modifiers, NativeEvent,
    Propagation,
};
use crate::interpret::{interpret, replay};
use crate::model::MaskModel;
use crate::platform::EventBindings;
use crate::props::{MaskedInputProps, PropsTransition, RenderedAttributes};
use crate::selection::{SelectionAccessor, detect};

type ChangeHandler = Box<dyn FnMut(&ChangeEvent)>;

/// Binds one [`TextControl`] to one mask model from mount to unmount.
///
/// Hosts forward native events through [`dispatch`](Self::dispatch) and
/// honour the returned [`Propagation`]. After every handled event the
/// control shows [`display_value`](Self::display_value) and, unless that is
/// empty, the model's selection.
pub struct MaskedInput<C: TextControl, M: MaskModel = InputMask> {
    control: C,
    mask: M,
    accessor: Box<dyn SelectionAccessor>,
    props: MaskedInputProps,
    bindings: EventBindings,
    on_change: Option<ChangeHandler>,
    restore_pending: bool,
}

impl<C: TextControl> MaskedInput<C, InputMask> {
    /// Build the mask from `props` and bind it to `control`.
    pub fn mount(control: C, props: MaskedInputProps) -> Result<Self, MaskError> {
        let mask = InputMask::new(props.mask_options())?;
        Ok(Self::mount_with_model(control, props, mask))
    }
}

impl<C: TextControl, M: MaskModel> MaskedInput<C, M> {
    pub fn mount_with_model(mut control: C, props: MaskedInputProps, mask: M) -> Self {
        let accessor = detect(&mut control);
        log::debug!(
            "mounting mask {:?} with {} selection access",
            props.mask,
            accessor.name()
        );

        let mut input = Self {
            control,
            mask,
            accessor,
            props,
            bindings: EventBindings::native(),
            on_change: None,
            restore_pending: false,
        };
        let value = input.mask.display_value();
        input.write_value(&value);
        input
    }

    /// Pick event bindings from a browser style user agent string.
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.bindings = EventBindings::for_user_agent(user_agent);
        self
    }

    pub fn with_on_change(mut self, on_change: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Release the control. Pending deferred work is dropped.
    pub fn unmount(self) -> C {
        self.control
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Direct access for native behaviour the controller passes through.
    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    pub fn model(&self) -> &M {
        &self.mask
    }

    pub fn props(&self) -> &MaskedInputProps {
        &self.props
    }

    pub fn bindings(&self) -> EventBindings {
        self.bindings
    }

    pub fn selection_api(&self) -> &'static str {
        self.accessor.name()
    }

    pub fn display_value(&self) -> String {
        self.mask.display_value()
    }

    pub fn attributes(&self) -> RenderedAttributes {
        let max_length = self.mask.pattern_len();
        RenderedAttributes {
            value: self.display_value(),
            max_length,
            size: self.props.size.unwrap_or(max_length),
            placeholder: self
                .props
                .placeholder
                .clone()
                .unwrap_or_else(|| self.mask.empty_value()),
        }
    }

    pub fn focus(&mut self) -> Result<(), ControlError> {
        self.control.focus()
    }

    pub fn blur(&mut self) {
        self.control.blur()
    }

    pub fn dispatch(&mut self, event: NativeEvent) -> Propagation {
        let kind = event.kind();
        if !self.bindings.handles(kind) {
            return Propagation::Continue;
        }
        match event {
            NativeEvent::Change => self.handle_change(),
            NativeEvent::KeyDown(key_down) => self.handle_key_down(&key_down),
            NativeEvent::KeyPress(input) | NativeEvent::BeforeInput(input) => {
                self.handle_character_input(&input)
            }
            NativeEvent::Paste(paste) => self.handle_paste(&paste.text),
        }
    }

    /// Whether deferred work is waiting for [`run_deferred`](Self::run_deferred).
    pub fn has_deferred(&self) -> bool {
        self.restore_pending
    }

    /// Run work deferred to the host's next tick.
    pub fn run_deferred(&mut self) {
        if std::mem::take(&mut self.restore_pending) && !self.mask.display_value().is_empty() {
            self.restore_selection();
        }
    }

    /// The control reported a value it produced itself.
    pub fn handle_change(&mut self) -> Propagation {
        self.run_deferred();

        let incoming = self.control.value();
        if incoming != self.mask.display_value() {
            let selection = self.read_selection();
            let op = interpret(&self.mask.value(), selection, &incoming);
            log::trace!("native change {incoming:?} replayed as {op:?}");
            if replay(&op, &mut self.mask) {
                self.sync_control();
            }
        }

        self.notify(ChangeCause::NativeChange);
        Propagation::Continue
    }

    pub fn handle_key_down(&mut self, event: &KeyDown) -> Propagation {
        self.run_deferred();

        if event.is_undo() {
            if self.mask.undo() {
                self.sync_control();
                self.notify(ChangeCause::Undo);
            }
            return Propagation::PreventDefault;
        }
        if event.is_redo() {
            if self.mask.redo() {
                self.sync_control();
                self.notify(ChangeCause::Redo);
            }
            return Propagation::PreventDefault;
        }

        if event.key == Key::Backspace {
            self.capture_selection();
            if self.mask.backspace() {
                self.sync_control();
                self.notify(ChangeCause::Backspace);
            }
            return Propagation::PreventDefault;
        }

        Propagation::Continue
    }

    pub fn handle_character_input(&mut self, event: &CharacterInput) -> Propagation {
        self.run_deferred();

        let modified = event
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META);
        if modified || event.is_enter() {
            return Propagation::Continue;
        }

        match event.text() {
            Some(InputText::Char(c)) => {
                self.capture_selection();
                if self.mask.input(c) {
                    self.sync_control();
                    self.notify(ChangeCause::Input);
                }
            }
            Some(InputText::Text(text)) => self.paste_text(&text),
            None => return Propagation::Continue,
        }
        Propagation::PreventDefault
    }

    pub fn handle_paste(&mut self, text: &str) -> Propagation {
        self.run_deferred();
        self.paste_text(text);
        Propagation::PreventDefault
    }

    /// Replace props, applying the pattern/value precedence rules.
    ///
    /// On a pattern error the previous props and model state are kept.
    pub fn set_props(&mut self, next: MaskedInputProps) -> Result<(), MaskError> {
        self.run_deferred();

        let transition = PropsTransition::between(&self.props, &next);
        log::debug!("props transition {transition:?}");

        match transition {
            PropsTransition::Unchanged => {}
            PropsTransition::Value => {
                self.mask.set_value(&next.value);
                let value = self.mask.display_value();
                self.write_value(&value);
            }
            PropsTransition::Pattern | PropsTransition::PatternAndValue => {
                let pivot = self.read_selection();
                let adopt_new_value = transition == PropsTransition::PatternAndValue
                    && self.mask.value() == self.mask.empty_value();
                let value = if adopt_new_value {
                    next.value.clone()
                } else {
                    self.mask.raw_value()
                };

                self.mask.set_pattern(
                    &next.mask,
                    PatternUpdate {
                        value,
                        selection: pivot,
                    },
                )?;

                let value = self.mask.display_value();
                self.write_value(&value);
                if self.mask.selection().start != 0 && !value.is_empty() {
                    self.restore_selection();
                }
            }
        }

        self.props = next;
        Ok(())
    }

    fn paste_text(&mut self, text: &str) {
        self.capture_selection();

        if self.mask.paste(text) {
            let value = self.mask.display_value();
            self.write_value(&value);
            self.restore_pending = true;
            self.notify(ChangeCause::Paste);
        } else {
            self.mask.set_value(text);
            self.sync_control();
        }
    }

    /// Write the display value and restore the selection unless it's empty.
    fn sync_control(&mut self) {
        let value = self.mask.display_value();
        self.write_value(&value);
        if !value.is_empty() {
            self.restore_selection();
        }
    }

    fn write_value(&mut self, value: &str) {
        if self.control.value() != value {
            self.control.set_value(value);
        }
    }

    fn read_selection(&mut self) -> Selection {
        match self.accessor.get(&mut self.control) {
            Ok(selection) => selection,
            Err(err) => {
                let fallback = self.mask.selection();
                log::debug!("reading selection failed: {err}; using {fallback:?}");
                fallback
            }
        }
    }

    fn capture_selection(&mut self) {
        let selection = self.read_selection();
        self.mask.set_selection(selection);
    }

    fn restore_selection(&mut self) {
        let selection = self.mask.selection();
        if let Err(err) = self.accessor.set(&mut self.control, selection) {
            log::debug!("restoring selection {selection:?} failed: {err}");
        }
    }

    fn notify(&mut self, cause: ChangeCause) {
        if let Some(on_change) = self.on_change.as_mut() {
            let event = ChangeEvent {
                value: self.control.value(),
                cause,
            };
            on_change(&event);
        }
    }
}
