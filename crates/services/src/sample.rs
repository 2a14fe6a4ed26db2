use vocab_core::model::VocabularyEntry;

/// Bundled starter list for learners who have not imported anything yet.
#[must_use]
pub fn sample_set() -> Vec<VocabularyEntry> {
    vec![
        VocabularyEntry::new("1", "Mitigate", "Giảm nhẹ / Làm dịu bớt")
            .with_definition("To make something less severe, serious, or painful.")
            .with_example("Drainage schemes have helped to mitigate the problem of flooding.")
            .with_level("7.5+")
            .with_collocations(["mitigate the effects", "mitigate the impact", "mitigate the risk"]),
        VocabularyEntry::new("2", "Ubiquitous", "Phổ biến / Có mặt khắp nơi")
            .with_definition("Present, appearing, or found everywhere.")
            .with_example("Computers are becoming increasingly ubiquitous in daily life.")
            .with_level("8.0+")
            .with_collocations(["nearly ubiquitous", "ubiquitous presence", "ubiquitous influence"]),
        VocabularyEntry::new("3", "Adversity", "Nghịch cảnh / Khó khăn")
            .with_definition("A difficult or unpleasant situation.")
            .with_example("He showed great courage in the face of adversity.")
            .with_level("7.0")
            .with_collocations(["overcome adversity", "face adversity", "economic adversity"]),
        VocabularyEntry::new("4", "Pragmatic", "Thực tế / Thực dụng")
            .with_definition("Dealing with things sensibly and realistically, based on practical rather than theoretical considerations.")
            .with_example("A pragmatic approach to politics is often more effective than an idealistic one.")
            .with_level("7.5")
            .with_collocations(["pragmatic solution", "pragmatic approach", "be pragmatic about"]),
        VocabularyEntry::new("5", "Resilient", "Kiên cường / Phục hồi nhanh")
            .with_definition("Able to withstand or recover quickly from difficult conditions.")
            .with_example("Babies are surprisingly resilient to minor illnesses.")
            .with_level("7.0")
            .with_collocations(["highly resilient", "resilient nature", "economically resilient"]),
        VocabularyEntry::new("6", "Scrutinize", "Xem xét / Kiểm tra kỹ lưỡng")
            .with_definition("Examine or inspect closely and thoroughly.")
            .with_example("Customers were warned to scrutinize the small print of any contract.")
            .with_level("7.5")
            .with_collocations(["scrutinize the details", "carefully scrutinize", "publicly scrutinize"]),
        VocabularyEntry::new("7", "Ambiguous", "Mơ hồ / Đa nghĩa")
            .with_definition("Open to more than one interpretation; not having one obvious meaning.")
            .with_example("The wording of the agreement is deliberately ambiguous.")
            .with_level("6.5")
            .with_collocations(["highly ambiguous", "ambiguous role", "remain ambiguous"]),
        VocabularyEntry::new("8", "Conducive", "Có lợi cho / Đưa đến")
            .with_definition("Making a certain situation or outcome likely or possible.")
            .with_example("The harsh lights and loud music were not conducive to a relaxed atmosphere.")
            .with_level("7.5")
            .with_collocations(["conducive to learning", "conducive to success", "environment conducive to"]),
        VocabularyEntry::new("9", "Detrimental", "Có hại / Bất lợi")
            .with_definition("Tending to cause harm.")
            .with_example("Moving her could have a detrimental effect on her health.")
            .with_level("6.5")
            .with_collocations(["detrimental effect", "detrimental impact", "highly detrimental"]),
        VocabularyEntry::new("10", "Exemplify", "Minh họa / Làm ví dụ cho")
            .with_definition("Be a typical example of.")
            .with_example("His works exemplify the best of modern American architecture.")
            .with_level("7.0")
            .with_collocations(["exemplify the trend", "clearly exemplify", "exemplify the point"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_and_translations_are_unique() {
        let words = sample_set();
        let ids: HashSet<_> = words.iter().map(|w| w.id.clone()).collect();
        let translations: HashSet<_> = words.iter().map(|w| w.translation.as_str()).collect();
        assert_eq!(ids.len(), words.len());
        assert_eq!(translations.len(), words.len());
    }
}
