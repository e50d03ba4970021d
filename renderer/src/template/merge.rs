use tracing::warn;

use super::{Slots, TemplateSet, TemplateValue};

/// Layer user overrides on top of `defaults`.
///
/// A section given as a table replaces only the slots it names. A section
/// given as any other value replaces the whole section, and every slot then
/// renders as invalid. Unknown sections and slots are ignored.
pub fn merge(defaults: &TemplateSet, overrides: &toml::Table) -> TemplateSet {
    let mut merged = defaults.clone();

    for (section_name, value) in overrides {
        let Some(section) = merged.section_mut(section_name) else {
            warn!(section = %section_name, "ignoring unknown template section");
            continue;
        };

        match value {
            toml::Value::Table(slots) => {
                for (slot_name, slot_value) in slots {
                    match section.slot_mut(slot_name) {
                        Some(slot) => *slot = TemplateValue::from_toml(slot_value),
                        None => warn!(
                            section = %section_name,
                            slot = %slot_name,
                            "ignoring unknown template slot"
                        ),
                    }
                }
            }
            _ => *section = Slots::invalid(),
        }
    }

    merged
}
