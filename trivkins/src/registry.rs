//! In-process signal registry.
//!
//! Implements [`SignalRegistrar`] over name-keyed maps. Constructed at
//! startup, handed to module setup by `&mut`, then driven by the host loop.
//! No global state, so every test builds its own registry.

use kins_common::hal::{
    BitPin, FloatPin, PeriodicFunction, PinDirection, RegistrationError, SignalRegistrar,
    validate_name,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone)]
enum Pin {
    Float(FloatPin),
    Bit(BitPin),
}

#[derive(Debug, Clone)]
struct PinEntry {
    dir: PinDirection,
    pin: Pin,
}

struct ExportedFunction {
    name: String,
    function: Box<dyn PeriodicFunction>,
}

/// Registry of pins and exported periodic functions.
pub struct SignalRegistry {
    pins: HashMap<String, PinEntry>,
    functions: Vec<ExportedFunction>,
    /// Maximum number of pins, `None` for unbounded.
    capacity: Option<usize>,
}

impl SignalRegistry {
    /// Create an empty, unbounded registry.
    pub fn new() -> Self {
        Self {
            pins: HashMap::new(),
            functions: Vec::new(),
            capacity: None,
        }
    }

    /// Create an empty registry that holds at most `capacity` pins.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    fn insert_pin(
        &mut self,
        dir: PinDirection,
        name: &str,
        pin: Pin,
    ) -> Result<(), RegistrationError> {
        validate_name(name)?;
        if self.pins.contains_key(name) {
            return Err(RegistrationError::Duplicate(name.to_string()));
        }
        if let Some(capacity) = self.capacity {
            if self.pins.len() >= capacity {
                return Err(RegistrationError::Exhausted { capacity });
            }
        }
        trace!("New pin {} ({:?})", name, dir);
        self.pins.insert(name.to_string(), PinEntry { dir, pin });
        Ok(())
    }

    /// Look up a float pin by name.
    pub fn float_pin(&self, name: &str) -> Option<FloatPin> {
        match self.pins.get(name) {
            Some(PinEntry {
                pin: Pin::Float(p), ..
            }) => Some(p.clone()),
            _ => None,
        }
    }

    /// Look up a bit pin by name.
    pub fn bit_pin(&self, name: &str) -> Option<BitPin> {
        match self.pins.get(name) {
            Some(PinEntry { pin: Pin::Bit(p), .. }) => Some(p.clone()),
            _ => None,
        }
    }

    /// Direction of a pin.
    pub fn direction(&self, name: &str) -> Option<PinDirection> {
        self.pins.get(name).map(|entry| entry.dir)
    }

    /// All pin names, sorted.
    pub fn pin_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.pins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Exported function names in registration order.
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Invoke every exported function once, in registration order.
    pub fn run_functions(&mut self, period: Duration) {
        for exported in &mut self.functions {
            exported.function.update(period);
        }
    }
}

impl Default for SignalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalRegistrar for SignalRegistry {
    fn new_float_pin(
        &mut self,
        dir: PinDirection,
        name: &str,
    ) -> Result<FloatPin, RegistrationError> {
        let pin = FloatPin::default();
        self.insert_pin(dir, name, Pin::Float(pin.clone()))?;
        Ok(pin)
    }

    fn new_bit_pin(&mut self, dir: PinDirection, name: &str) -> Result<BitPin, RegistrationError> {
        let pin = BitPin::default();
        self.insert_pin(dir, name, Pin::Bit(pin.clone()))?;
        Ok(pin)
    }

    fn export_function(
        &mut self,
        name: &str,
        function: Box<dyn PeriodicFunction>,
    ) -> Result<(), RegistrationError> {
        validate_name(name)?;
        if self.functions.iter().any(|f| f.name == name) {
            return Err(RegistrationError::Duplicate(name.to_string()));
        }
        trace!("Exported function {}", name);
        self.functions.push(ExportedFunction {
            name: name.to_string(),
            function,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(FloatPin);

    impl PeriodicFunction for Counter {
        fn update(&mut self, _period: Duration) {
            self.0.set(self.0.get() + 1.0);
        }
    }

    #[test]
    fn create_and_look_up_pins() {
        let mut reg = SignalRegistry::new();
        let out = reg.new_float_pin(PinDirection::Out, "m.0.out").unwrap();
        reg.new_bit_pin(PinDirection::In, "m.0.flag").unwrap();

        out.set(2.5);
        assert_eq!(reg.float_pin("m.0.out").unwrap().get(), 2.5);
        assert!(reg.bit_pin("m.0.flag").is_some());
        assert!(reg.bit_pin("m.0.out").is_none());
        assert_eq!(reg.direction("m.0.flag"), Some(PinDirection::In));
        assert_eq!(reg.pin_names(), vec!["m.0.flag", "m.0.out"]);
    }

    #[test]
    fn duplicate_pin_rejected() {
        let mut reg = SignalRegistry::new();
        reg.new_float_pin(PinDirection::In, "m.x").unwrap();
        let err = reg.new_bit_pin(PinDirection::In, "m.x").unwrap_err();
        assert_eq!(err, RegistrationError::Duplicate("m.x".to_string()));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut reg = SignalRegistry::with_capacity(1);
        reg.new_float_pin(PinDirection::In, "a").unwrap();
        assert_eq!(
            reg.new_float_pin(PinDirection::In, "b").unwrap_err(),
            RegistrationError::Exhausted { capacity: 1 }
        );
    }

    #[test]
    fn run_functions_in_order() {
        let mut reg = SignalRegistry::new();
        let pin = reg.new_float_pin(PinDirection::Out, "count").unwrap();
        reg.export_function("count.update", Box::new(Counter(pin.clone())))
            .unwrap();
        assert!(matches!(
            reg.export_function("count.update", Box::new(Counter(pin.clone()))),
            Err(RegistrationError::Duplicate(_))
        ));

        reg.run_functions(Duration::from_millis(1));
        reg.run_functions(Duration::from_millis(1));
        assert_eq!(pin.get(), 2.0);
        assert_eq!(reg.function_names(), vec!["count.update"]);
    }
}
