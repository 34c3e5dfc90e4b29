//! Signal channel information

/// One recorded signal: its label and the transducer used for it
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    pub label: String,
    pub transducer_type: String,
}

impl ChannelInfo {
    /// Pair channel labels with transducer types positionally.
    ///
    /// Labels are always trimmed. The type list may be shorter than the
    /// label list, or missing entirely; positions without a type get an
    /// empty string.
    pub fn from_lists(labels: &[String], types: &[String]) -> Vec<ChannelInfo> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| ChannelInfo {
                label: label.trim().to_string(),
                transducer_type: types
                    .get(i)
                    .map(|t| t.trim().to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_label_list_yields_no_channels() {
        assert!(ChannelInfo::from_lists(&[], &strings(&["AgCl"])).is_empty());
    }

    #[test]
    fn labels_without_types_get_empty_types() {
        let channels = ChannelInfo::from_lists(&strings(&[" EEG Fp1 ", "EEG Fp2"]), &[]);
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].label, "EEG Fp1");
        assert_eq!(channels[0].transducer_type, "");
        assert_eq!(channels[1].label, "EEG Fp2");
    }

    #[test]
    fn types_are_paired_positionally() {
        let channels = ChannelInfo::from_lists(
            &strings(&["EEG Fp1", "ECG"]),
            &strings(&[" AgCl ", "Active electrode"]),
        );
        assert_eq!(channels[0].transducer_type, "AgCl");
        assert_eq!(channels[1].transducer_type, "Active electrode");
    }

    #[test]
    fn short_type_list_pads_with_empty_strings() {
        let channels = ChannelInfo::from_lists(
            &strings(&["EEG Fp1", "EEG Fp2", "ECG"]),
            &strings(&["AgCl"]),
        );
        assert_eq!(channels[0].transducer_type, "AgCl");
        assert_eq!(channels[1].transducer_type, "");
        assert_eq!(channels[2].transducer_type, "");
    }
}
