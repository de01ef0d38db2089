//! Static rule table mapping employment type and role to checklist templates.

use serde::Serialize;

use crate::models::{EmploymentType, Role};

/// A checklist item before it is attached to an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub critical: bool,
    pub risk_note: &'static str,
}

/// Items every new hire gets, regardless of type or role.
pub static BASELINE: [TaskTemplate; 3] = [
    TaskTemplate {
        id: "ob-1",
        title: "收取基本資料",
        description: "身分證、執業執照影本(醫事人員必備)、薪轉存摺。",
        critical: false,
        risk_note: "資料不全",
    },
    TaskTemplate {
        id: "ob-3",
        title: "勞健保/勞退加保",
        description: "務必於「到職當日」申報。",
        critical: true,
        risk_note: "勞保局罰款保費4-10倍",
    },
    TaskTemplate {
        id: "ob-5",
        title: "建立出勤紀錄",
        description: "需記錄至「分鐘」。即使是責任制(經核定)也需記錄。",
        critical: true,
        risk_note: "罰款 9-45 萬",
    },
];

pub static PART_TIME: [TaskTemplate; 2] = [
    TaskTemplate {
        id: "pt-1",
        title: "兼職薪資與國定假日確認",
        description: "確認時薪不低於基本工資。國定假日出勤需給「雙倍」薪資。",
        critical: true,
        risk_note: "違反工資給付規定",
    },
    TaskTemplate {
        id: "pt-2",
        title: "部分工時特休計算",
        description: "依工時比例計算特休天數，非直接比照全職。",
        critical: false,
        risk_note: "特休給付不足",
    },
];

pub static FULL_TIME: [TaskTemplate; 1] = [TaskTemplate {
    id: "ft-1",
    title: "簽署勞動契約 (不定期)",
    description: "確認為不定期契約，約定月薪結構。",
    critical: true,
    risk_note: "契約爭議",
}];

pub static DOCTOR: [TaskTemplate; 2] = [
    TaskTemplate {
        id: "doc-1",
        title: "醫師契約性質確認",
        description: "確認是「僱傭」(適用勞基法)或「委任」(駐診拆帳)。若為僱傭仍需投保勞工保險(自願投保)或就業保險。",
        critical: true,
        risk_note: "身分認定爭議",
    },
    TaskTemplate {
        id: "doc-2",
        title: "衛生局執業登記 (支援報備)",
        description: "確認醫師執照已辦理執業登記或支援報備。",
        critical: true,
        risk_note: "違反醫療法",
    },
];

/// Applied to every role other than doctor.
pub static MEDICAL_LICENSE: [TaskTemplate; 1] = [TaskTemplate {
    id: "med-1",
    title: "醫事人員執業登記",
    description: "確認執照已登錄於本機構。",
    critical: true,
    risk_note: "違反醫事法規",
}];

/// Templates for a hire, in checklist order: baseline, then the employment
/// type block, then the role block.
pub fn rules_for(employment_type: EmploymentType, role: &Role) -> Vec<&'static TaskTemplate> {
    let by_type: &'static [TaskTemplate] = match employment_type {
        EmploymentType::PartTime => &PART_TIME,
        EmploymentType::FullTime => &FULL_TIME,
    };
    let by_role: &'static [TaskTemplate] = if role.is_doctor() {
        &DOCTOR
    } else {
        &MEDICAL_LICENSE
    };

    BASELINE.iter().chain(by_type).chain(by_role).collect()
}
