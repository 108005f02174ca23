//! Singleton segments under `/security`. They carry little more than an id;
//! their content is reached through navigation.

use m365sec_core::backed_model;

backed_model! {
    pub struct Security ["#microsoft.graph.security"] {
        "id" => id, set_id: String,
    }
}

backed_model! {
    pub struct CasesRoot ["#microsoft.graph.security.casesRoot"] {
        "id" => id, set_id: String,
    }
}

backed_model! {
    pub struct AttackSimulationRoot ["#microsoft.graph.attackSimulationRoot"] {
        "id" => id, set_id: String,
    }
}

backed_model! {
    pub struct LabelsRoot ["#microsoft.graph.security.labelsRoot"] {
        "id" => id, set_id: String,
    }
}

backed_model! {
    pub struct ThreatIntelligence ["#microsoft.graph.security.threatIntelligence"] {
        "id" => id, set_id: String,
    }
}

backed_model! {
    pub struct TriggersRoot ["#microsoft.graph.security.triggersRoot"] {
        "id" => id, set_id: String,
    }
}

backed_model! {
    pub struct TriggerTypesRoot ["#microsoft.graph.security.triggerTypesRoot"] {
        "id" => id, set_id: String,
    }
}
