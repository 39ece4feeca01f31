use crate::{context::ContextState, types::err::ConfigError};

/// A configurable value, with bounds and the latest state of a context in which it may be revised.
#[derive(Clone)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub max_state: ContextState,
    pub value: T,
}

impl<T: Clone> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    /// Sets the value of the option, given the state of the context the option belongs to.
    ///
    /// A configuration not yet given to a context is in [ContextState::Configuration].
    pub fn set(&mut self, value: T, state: ContextState) -> Result<(), ConfigError> {
        if !state.permits_revision_until(self.max_state) {
            return Err(ConfigError::InvalidState(self.name));
        }

        let (min, max) = self.min_max();
        if value < min || max < value {
            return Err(ConfigError::OutOfBounds(self.name));
        }

        self.value = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(max_state: ContextState) -> ConfigOption<u32> {
        ConfigOption {
            name: "option",
            min: 1,
            max: 10,
            max_state,
            value: 5,
        }
    }

    #[test]
    fn bounds() {
        let mut option = option(ContextState::Input);
        assert_eq!(option.set(10, ContextState::Configuration), Ok(()));
        assert_eq!(
            option.set(11, ContextState::Configuration),
            Err(ConfigError::OutOfBounds("option"))
        );
        assert_eq!(option.set(0, ContextState::Input), Err(ConfigError::OutOfBounds("option")));
        assert_eq!(option.value, 10);
    }

    #[test]
    fn states() {
        let mut fixed = option(ContextState::Configuration);
        assert_eq!(fixed.set(2, ContextState::Configuration), Ok(()));
        assert_eq!(fixed.set(3, ContextState::Input), Err(ConfigError::InvalidState("option")));

        let mut open = option(ContextState::Input);
        assert_eq!(open.set(3, ContextState::Input), Ok(()));
        assert_eq!(
            open.set(4, ContextState::Satisfiable),
            Err(ConfigError::InvalidState("option"))
        );
        assert_eq!(open.value, 3);
    }
}
